use crate::article::MAX_ARTICLES;
use std::time::Duration;

/// Configuration for the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of Lloyd iterations per restart
    pub max_iters: usize,

    /// Convergence tolerance. When centroid shift is below this threshold,
    /// the algorithm stops early. Set to negative value to disable early stopping
    /// on shift; unchanged assignments still end the loop.
    pub tol: f64,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Number of seeded restarts. The restart with the lowest inertia wins.
    pub n_init: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 300,
            tol: 1e-4,
            seed: 42,
            n_init: 10,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of restarts
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }
}

/// Configuration for the TF-IDF text vectorizer
#[derive(Debug, Clone)]
pub struct VectorizerConfig {
    /// Tokens shorter than this many characters are dropped
    pub min_token_len: usize,

    /// Replace raw term counts with `1 + ln(count)`
    pub sublinear_tf: bool,

    /// L2-normalise every row after weighting
    pub normalize: bool,

    /// Drop tokens found in the built-in English stop-word list
    pub stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            sublinear_tf: false,
            normalize: true,
            stop_words: true,
        }
    }
}

impl VectorizerConfig {
    /// Set the minimum token length in characters
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Enable or disable sublinear term frequency
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Enable or disable L2 row normalisation
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enable or disable stop-word removal
    pub fn with_stop_words(mut self, stop_words: bool) -> Self {
        self.stop_words = stop_words;
        self
    }
}

/// Settings for one vectorize, cluster and assemble pass
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Seed shared by every run so identical batches cluster identically
    pub seed: u64,

    /// Maximum number of Lloyd iterations per restart
    pub max_iters: usize,

    /// Centroid-shift tolerance for early stopping (negative disables it)
    pub tol: f64,

    /// Number of seeded k-means restarts
    pub n_init: usize,

    /// Number of label terms kept per cluster
    pub top_terms: usize,

    /// Tokenisation and weighting settings
    pub vectorizer: VectorizerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let kmeans = KMeansConfig::default();
        Self {
            seed: kmeans.seed,
            max_iters: kmeans.max_iters,
            tol: kmeans.tol,
            n_init: kmeans.n_init,
            top_terms: 10,
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the number of restarts
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the number of label terms per cluster
    pub fn with_top_terms(mut self, top_terms: usize) -> Self {
        self.top_terms = top_terms;
        self
    }

    /// Set the vectorizer configuration
    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// K-means settings for a run that uses `k` clusters
    pub fn kmeans_config(&self, k: usize) -> KMeansConfig {
        KMeansConfig {
            k,
            max_iters: self.max_iters,
            tol: self.tol,
            seed: self.seed,
            n_init: self.n_init,
        }
    }
}

/// Where and how the front page is scraped
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Front page to scrape
    pub url: String,

    /// CSS selector matching headline anchors
    pub selector: String,

    /// Cap on the number of articles returned
    pub max_articles: usize,

    /// `User-Agent` header sent with the page request
    pub user_agent: String,

    /// Timeout for the whole page request
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://www.bbc.co.uk/news".to_string(),
            selector: "a.gs-c-promo-heading".to_string(),
            max_articles: MAX_ARTICLES,
            user_agent: concat!("headline-clusters/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SourceConfig {
    /// Scrape a different front page
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Match headline anchors with a different selector
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Set the cap on returned articles
    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
