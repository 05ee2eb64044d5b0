//! # headline-clusters
//!
//! Groups the headlines of a news front page into topic clusters.
//!
//! ## Pipeline
//!
//! - **Article source**: scrapes up to 20 `(title, link)` pairs from a front
//!   page, or replays a fixed list offline
//! - **TF-IDF vectorizer**: turns titles into L2-normalised term weights over a
//!   vocabulary rebuilt for every batch, with English stop words removed
//! - **Cluster engine**: seeded k-means++ / Lloyd's k-means on ndarray
//!   matrices, labelling every cluster with its heaviest centroid terms
//! - **Assembler**: joins assignments back to the articles
//! - **Presenter**: renders clusters and reads the operator's cluster count
//!
//! ## Example
//!
//! ```rust
//! use headline_clusters::{Pipeline, RunRequest, StaticSource};
//!
//! let mut source = StaticSource::from_pairs([
//!     ("Election results announced", "https://example.com/1"),
//!     ("Markets react to election", "https://example.com/2"),
//!     ("Football team wins championship", "https://example.com/3"),
//!     ("Championship football highlights", "https://example.com/4"),
//! ])
//! .unwrap();
//!
//! let outcome = Pipeline::default()
//!     .run(&mut source, RunRequest::new(2).unwrap())
//!     .unwrap();
//!
//! for cluster in outcome.clusters() {
//!     println!("Cluster {}: {}", cluster.id + 1, cluster.terms.join(", "));
//! }
//! ```
//!
//! Clustering is deterministic: the same titles in the same order with the
//! same [`PipelineConfig::seed`] always produce the same clusters.

mod algorithm;
mod article;
mod assembler;
mod config;
mod distance;
mod engine;
mod error;
mod kmeans;
mod pipeline;
mod presenter;
mod source;
mod stop_words;
mod vectorizer;

pub use article::{
    Article, RunRequest, DEFAULT_CLUSTER_COUNT, MAX_ARTICLES, MAX_CLUSTER_COUNT, MIN_CLUSTER_COUNT,
};
pub use assembler::{assemble, Cluster};
pub use config::{KMeansConfig, PipelineConfig, SourceConfig, VectorizerConfig};
pub use engine::{top_terms, ClusterEngine, Clustering};
pub use error::{Error, Result};
pub use kmeans::KMeans;
pub use pipeline::{Pipeline, RunOutcome, Stage};
pub use presenter::{serve, PageConfig, Presenter, TerminalPresenter, NO_ARTICLES_MESSAGE};
pub use source::{parse_front_page, ArticleSource, FrontPageSource, StaticSource};
pub use stop_words::ENGLISH_STOP_WORDS;
pub use vectorizer::{FeatureMatrix, TfidfVectorizer};
