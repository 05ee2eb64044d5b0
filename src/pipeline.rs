use crate::article::{Article, RunRequest};
use crate::assembler::{assemble, Cluster};
use crate::config::PipelineConfig;
use crate::engine::ClusterEngine;
use crate::error::{Error, Result};
use crate::source::ArticleSource;
use crate::vectorizer::TfidfVectorizer;
use log::{debug, info};
use std::fmt;

/// Stages a single run passes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Vectorizing,
    Clustering,
    Assembling,
    Rendering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Vectorizing => "vectorizing",
            Stage::Clustering => "clustering",
            Stage::Assembling => "assembling",
            Stage::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

/// Terminal state of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The source produced no articles; nothing was clustered
    NoArticles,

    /// Clusters ordered by id
    Clusters(Vec<Cluster>),
}

impl RunOutcome {
    /// Clusters of the run, empty when no articles were found
    pub fn clusters(&self) -> &[Cluster] {
        match self {
            RunOutcome::NoArticles => &[],
            RunOutcome::Clusters(clusters) => clusters,
        }
    }
}

/// Vectorize, cluster and assemble one batch of articles per run.
///
/// Holds only configuration; every run builds its vocabulary and vectors
/// from scratch.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch from `source` and cluster the result.
    ///
    /// Any error aborts the whole run; partial results are never returned.
    pub fn run<S: ArticleSource + ?Sized>(
        &self,
        source: &mut S,
        request: RunRequest,
    ) -> Result<RunOutcome> {
        enter(Stage::Fetching);
        let articles = source.fetch()?;
        self.cluster_articles(&articles, request)
    }

    /// Cluster an already fetched batch.
    pub fn cluster_articles(&self, articles: &[Article], request: RunRequest) -> Result<RunOutcome> {
        if articles.is_empty() {
            info!("No articles found, skipping clustering");
            return Ok(RunOutcome::NoArticles);
        }

        match self.cluster_batch(articles, request.desired_cluster_count()) {
            Ok(clusters) => Ok(RunOutcome::Clusters(clusters)),
            Err(Error::EmptyBatch) => Ok(RunOutcome::NoArticles),
            Err(e) => Err(e),
        }
    }

    /// Vectorize, cluster and assemble `articles` into at most `k_requested`
    /// clusters.
    pub fn cluster_batch(&self, articles: &[Article], k_requested: usize) -> Result<Vec<Cluster>> {
        enter(Stage::Vectorizing);
        let titles: Vec<&str> = articles.iter().map(Article::title).collect();
        let mut vectorizer = TfidfVectorizer::with_config(self.config.vectorizer.clone());
        let matrix = vectorizer.fit_transform(titles.as_slice())?;
        info!(
            "Vectorized {} titles over {} terms",
            titles.len(),
            matrix.vocabulary.len()
        );

        enter(Stage::Clustering);
        let clustering = ClusterEngine::new(self.config.clone()).cluster(&matrix, k_requested)?;

        enter(Stage::Assembling);
        assemble(articles, &clustering)
    }
}

pub(crate) fn enter(stage: Stage) {
    debug!("Pipeline stage: {}", stage);
}
