//! Operator-facing side of a session: reading the cluster-count control,
//! triggering runs and rendering their outcome.

use crate::article::{RunRequest, DEFAULT_CLUSTER_COUNT, MAX_CLUSTER_COUNT, MIN_CLUSTER_COUNT};
use crate::error::{Error, Result};
use crate::pipeline::{enter, Pipeline, RunOutcome, Stage};
use crate::source::ArticleSource;
use log::{debug, error};
use std::io::{BufRead, Write};

/// Message shown when a run finds nothing to cluster
pub const NO_ARTICLES_MESSAGE: &str =
    "No articles found. Please check the URL or try a different site.";

/// Page-level settings applied once at the start of a session
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Clustered News Articles from BBC".to_string(),
            heading: "Clustered News Articles from BBC News".to_string(),
        }
    }
}

/// Renders run outcomes and supplies the operator's next request
pub trait Presenter {
    /// Apply page-level settings. Called exactly once, before any run.
    fn configure(&mut self, page: &PageConfig) -> Result<()>;

    /// Block until the operator triggers a run. `None` ends the session.
    fn next_request(&mut self) -> Result<Option<RunRequest>>;

    fn render(&mut self, outcome: &RunOutcome) -> Result<()>;

    fn render_error(&mut self, error: &Error) -> Result<()>;
}

/// Line-oriented presenter over any reader/writer pair.
///
/// Typing a number moves the cluster-count control (clamped to `[2, 20]`),
/// `run` or an empty line triggers a run, `quit` or end of input ends the
/// session. Output is Markdown.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    cluster_count: usize,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            cluster_count: DEFAULT_CLUSTER_COUNT,
        }
    }

    /// Current position of the cluster-count control
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn configure(&mut self, page: &PageConfig) -> Result<()> {
        debug!("Page configured: {:?}", page.title);
        writeln!(self.output, "# {}", page.heading)?;
        writeln!(self.output)?;
        Ok(())
    }

    fn next_request(&mut self) -> Result<Option<RunRequest>> {
        loop {
            write!(
                self.output,
                "Number of clusters [{}-{}]: {}. Type a number to change it, `run` to scrape and cluster, `quit` to exit.\n> ",
                MIN_CLUSTER_COUNT, MAX_CLUSTER_COUNT, self.cluster_count
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim() {
                "" | "run" => return RunRequest::new(self.cluster_count).map(Some),
                "quit" | "q" | "exit" => return Ok(None),
                other => match other.parse::<usize>() {
                    Ok(n) => {
                        self.cluster_count = n.clamp(MIN_CLUSTER_COUNT, MAX_CLUSTER_COUNT);
                        writeln!(self.output, "Number of clusters set to {}", self.cluster_count)?;
                    }
                    Err(_) => writeln!(self.output, "Unrecognised input {:?}", other)?,
                },
            }
        }
    }

    fn render(&mut self, outcome: &RunOutcome) -> Result<()> {
        match outcome {
            RunOutcome::NoArticles => writeln!(self.output, "{}", NO_ARTICLES_MESSAGE)?,
            RunOutcome::Clusters(clusters) => {
                for cluster in clusters {
                    writeln!(self.output, "## Cluster {}", cluster.id + 1)?;
                    writeln!(self.output, "**Top terms:** {}", cluster.terms.join(", "))?;
                    for article in &cluster.articles {
                        writeln!(self.output, "- [{}]({})", article.title(), article.link())?;
                    }
                    writeln!(self.output)?;
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn render_error(&mut self, error: &Error) -> Result<()> {
        match error {
            Error::EmptyBatch => writeln!(self.output, "{}", NO_ARTICLES_MESSAGE)?,
            other => writeln!(self.output, "Error: {}", other)?,
        }
        self.output.flush()?;
        Ok(())
    }
}

/// Drive a session: configure the page once, then fetch, cluster and render
/// once per operator trigger until the presenter ends the session.
///
/// Run failures are rendered and the session carries on; only presenter I/O
/// failures end it early.
pub fn serve<S, P>(
    pipeline: &Pipeline,
    source: &mut S,
    presenter: &mut P,
    page: &PageConfig,
) -> Result<()>
where
    S: ArticleSource + ?Sized,
    P: Presenter + ?Sized,
{
    presenter.configure(page)?;

    loop {
        enter(Stage::Idle);
        let Some(request) = presenter.next_request()? else {
            break;
        };

        match pipeline.run(source, request) {
            Ok(outcome) => {
                enter(Stage::Rendering);
                presenter.render(&outcome)?;
            }
            Err(e) => {
                error!("Run failed: {}", e);
                presenter.render_error(&e)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::assembler::Cluster;
    use std::io::Cursor;

    fn presenter(input: &str) -> TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPresenter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(presenter: TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(presenter.into_output()).unwrap()
    }

    #[test]
    fn test_next_request_default_count() {
        let mut p = presenter("run\n");
        let request = p.next_request().unwrap().unwrap();
        assert_eq!(request.desired_cluster_count(), 5);
    }

    #[test]
    fn test_next_request_clamps_control() {
        let mut p = presenter("50\n\n1\nrun\n");
        assert_eq!(p.next_request().unwrap().unwrap().desired_cluster_count(), 20);
        assert_eq!(p.next_request().unwrap().unwrap().desired_cluster_count(), 2);
    }

    #[test]
    fn test_next_request_ends_on_quit_or_eof() {
        let mut p = presenter("bogus\nquit\n");
        assert!(p.next_request().unwrap().is_none());
        assert!(output(p).contains("Unrecognised input \"bogus\""));

        let mut p = presenter("");
        assert!(p.next_request().unwrap().is_none());
    }

    #[test]
    fn test_render_clusters() {
        let mut p = presenter("");
        let outcome = RunOutcome::Clusters(vec![Cluster {
            id: 0,
            terms: vec!["election".to_string(), "results".to_string()],
            articles: vec![Article::new("Election results", "https://example.com/1").unwrap()],
        }]);
        p.render(&outcome).unwrap();

        let text = output(p);
        assert!(text.contains("## Cluster 1\n"));
        assert!(text.contains("**Top terms:** election, results\n"));
        assert!(text.contains("- [Election results](https://example.com/1)\n"));
    }

    #[test]
    fn test_render_no_articles() {
        let mut p = presenter("");
        p.render(&RunOutcome::NoArticles).unwrap();
        assert_eq!(output(p), format!("{}\n", NO_ARTICLES_MESSAGE));
    }

    #[test]
    fn test_render_error() {
        let mut p = presenter("");
        p.render_error(&Error::Fetch("timed out".to_string())).unwrap();
        assert_eq!(output(p), "Error: Failed to fetch articles: timed out\n");
    }
}
