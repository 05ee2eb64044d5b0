use crate::error::{Error, Result};
use url::Url;

/// Maximum number of articles taken from a single front page
pub const MAX_ARTICLES: usize = 20;

/// Smallest cluster count the operator may request
pub const MIN_CLUSTER_COUNT: usize = 2;

/// Largest cluster count the operator may request
pub const MAX_CLUSTER_COUNT: usize = 20;

/// Cluster count selected when the operator has not chosen one
pub const DEFAULT_CLUSTER_COUNT: usize = 5;

/// A headline scraped from the front page together with its absolute link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    title: String,
    link: String,
}

impl Article {
    /// Create a new article.
    ///
    /// The title is trimmed and must not be empty; the link must parse as an
    /// absolute URL.
    pub fn new(title: impl AsRef<str>, link: impl AsRef<str>) -> Result<Self> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(Error::InvalidArticle("title is empty".to_string()));
        }

        let link = link.as_ref().trim();
        Url::parse(link)
            .map_err(|e| Error::InvalidArticle(format!("link {:?} is not absolute: {}", link, e)))?;

        Ok(Self {
            title: title.to_string(),
            link: link.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }
}

/// One operator-triggered run and the number of clusters it asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    desired_cluster_count: usize,
}

impl RunRequest {
    /// Create a run request, rejecting counts outside `[2, 20]`.
    pub fn new(desired_cluster_count: usize) -> Result<Self> {
        if !(MIN_CLUSTER_COUNT..=MAX_CLUSTER_COUNT).contains(&desired_cluster_count) {
            return Err(Error::InvalidClusterCount(format!(
                "{} is outside [{}, {}]",
                desired_cluster_count, MIN_CLUSTER_COUNT, MAX_CLUSTER_COUNT
            )));
        }
        Ok(Self {
            desired_cluster_count,
        })
    }

    pub fn desired_cluster_count(&self) -> usize {
        self.desired_cluster_count
    }

    /// Cluster count actually used for a batch of `n_articles`
    pub fn effective_cluster_count(&self, n_articles: usize) -> usize {
        self.desired_cluster_count.min(n_articles)
    }
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            desired_cluster_count: DEFAULT_CLUSTER_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_trims_title() {
        let article = Article::new("  Election results  ", "https://www.bbc.co.uk/news/1").unwrap();
        assert_eq!(article.title(), "Election results");
        assert_eq!(article.link(), "https://www.bbc.co.uk/news/1");
    }

    #[test]
    fn test_article_keeps_link_as_given() {
        let article = Article::new("Headline", " https://example.com ").unwrap();
        assert_eq!(article.link(), "https://example.com");
    }

    #[test]
    fn test_article_rejects_blank_title() {
        let result = Article::new("   ", "https://www.bbc.co.uk/news/1");
        assert!(matches!(result, Err(Error::InvalidArticle(_))));
    }

    #[test]
    fn test_article_rejects_relative_link() {
        let result = Article::new("Headline", "/news/world-123");
        assert!(matches!(result, Err(Error::InvalidArticle(_))));
    }

    #[test]
    fn test_run_request_bounds() {
        assert!(RunRequest::new(2).is_ok());
        assert!(RunRequest::new(20).is_ok());
        assert!(matches!(
            RunRequest::new(1),
            Err(Error::InvalidClusterCount(_))
        ));
        assert!(matches!(
            RunRequest::new(21),
            Err(Error::InvalidClusterCount(_))
        ));
        assert_eq!(RunRequest::default().desired_cluster_count(), 5);
    }

    #[test]
    fn test_effective_cluster_count() {
        let request = RunRequest::new(5).unwrap();
        assert_eq!(request.effective_cluster_count(3), 3);
        assert_eq!(request.effective_cluster_count(20), 5);
        assert_eq!(request.effective_cluster_count(0), 0);
    }
}
