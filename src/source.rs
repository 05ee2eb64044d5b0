//! Article sources.
//!
//! The pipeline only sees the [`ArticleSource`] trait, so clustering can be
//! driven by a live front page ([`FrontPageSource`]) or by a fixed list of
//! headlines ([`StaticSource`]) without touching the network.

use crate::article::Article;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use url::Url;

/// Something that yields the headlines for one run
pub trait ArticleSource {
    /// Produce the current articles, at most the source's configured cap.
    /// An empty list is a valid answer.
    fn fetch(&mut self) -> Result<Vec<Article>>;
}

/// Scrapes headline anchors from a news front page over blocking HTTP
pub struct FrontPageSource {
    config: SourceConfig,
    client: Client,
}

impl FrontPageSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Fetch(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

impl ArticleSource for FrontPageSource {
    fn fetch(&mut self) -> Result<Vec<Article>> {
        debug!("GET {}", self.config.url);

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Fetch(format!("{}: {}", self.config.url, e)))?;

        // Redirects may move the page, so relative links resolve against the final URL
        let base = response.url().to_string();
        let html = response
            .text()
            .map_err(|e| Error::Fetch(format!("{}: {}", self.config.url, e)))?;

        let articles = parse_front_page(&html, &base, &self.config.selector, self.config.max_articles)?;
        info!("Fetched {} articles from {}", articles.len(), base);
        Ok(articles)
    }
}

/// Extract `(title, link)` pairs from the anchors of `html` matching `selector`.
///
/// Titles are the anchors' trimmed text; links are resolved against
/// `base_url`. Anchors without text or without a usable `href` are skipped.
/// At most `max_articles` articles are returned, in document order.
pub fn parse_front_page(
    html: &str,
    base_url: &str,
    selector: &str,
    max_articles: usize,
) -> Result<Vec<Article>> {
    let base = Url::parse(base_url)
        .map_err(|e| Error::Fetch(format!("invalid page URL {:?}: {}", base_url, e)))?;
    let selector = Selector::parse(selector)
        .map_err(|e| Error::Fetch(format!("invalid selector {:?}: {}", selector, e)))?;

    let document = Html::parse_document(html);
    let mut articles = Vec::new();

    for anchor in document.select(&selector) {
        if articles.len() >= max_articles {
            break;
        }

        let title = anchor.text().collect::<String>();
        let Some(href) = anchor.value().attr("href") else {
            warn!("Skipping headline {:?} without href", title.trim());
            continue;
        };

        let link = match base.join(href) {
            Ok(link) => link,
            Err(e) => {
                warn!("Skipping headline {:?}: bad href {:?} ({})", title.trim(), href, e);
                continue;
            }
        };

        match Article::new(&title, link.as_str()) {
            Ok(article) => articles.push(article),
            Err(e) => warn!("Skipping anchor {}: {}", link, e),
        }
    }

    Ok(articles)
}

/// Yields a fixed list of articles, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    articles: Vec<Article>,
}

impl StaticSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Build a source from `(title, link)` pairs.
    pub fn from_pairs<T, L>(pairs: impl IntoIterator<Item = (T, L)>) -> Result<Self>
    where
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let articles = pairs
            .into_iter()
            .map(|(title, link)| Article::new(title, link))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(articles))
    }
}

impl ArticleSource for StaticSource {
    fn fetch(&mut self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <a class="gs-c-promo-heading" href="/news/uk-1">  Election results announced </a>
          <a class="other" href="/news/ignored">Not a headline</a>
          <a class="gs-c-promo-heading" href="https://www.bbc.com/sport/2"><h3>Football team wins championship</h3></a>
          <a class="gs-c-promo-heading" href="/news/blank">   </a>
          <a class="gs-c-promo-heading">No link here</a>
          <a class="gs-c-promo-heading" href="/news/weather-3">Weather forecast for the week</a>
        </body></html>
    "#;

    #[test]
    fn test_parse_front_page() {
        let articles =
            parse_front_page(PAGE, "https://www.bbc.co.uk/news", "a.gs-c-promo-heading", 20).unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title(), "Election results announced");
        assert_eq!(articles[0].link(), "https://www.bbc.co.uk/news/uk-1");
        assert_eq!(articles[1].title(), "Football team wins championship");
        assert_eq!(articles[1].link(), "https://www.bbc.com/sport/2");
        assert_eq!(articles[2].link(), "https://www.bbc.co.uk/news/weather-3");
    }

    #[test]
    fn test_parse_front_page_cap() {
        let articles =
            parse_front_page(PAGE, "https://www.bbc.co.uk/news", "a.gs-c-promo-heading", 2).unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_parse_front_page_no_matches() {
        let articles = parse_front_page("<html></html>", "https://example.com", "a.story", 20).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_parse_front_page_bad_selector() {
        let result = parse_front_page(PAGE, "https://example.com", "a[", 20);
        assert!(matches!(result, Err(Error::Fetch(_))));
    }

    #[test]
    fn test_static_source() {
        let mut source =
            StaticSource::from_pairs([("Election results", "https://example.com/1")]).unwrap();
        let articles = source.fetch().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title(), "Election results");
    }

    #[test]
    fn test_static_source_rejects_relative_link() {
        let result = StaticSource::from_pairs([("Election results", "/news/1")]);
        assert!(matches!(result, Err(Error::InvalidArticle(_))));
    }
}
