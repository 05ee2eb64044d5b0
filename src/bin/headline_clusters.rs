//! Interactive headline clustering session.
//!
//! Scrapes the BBC News front page on every trigger, clusters the headlines
//! and prints the groups as Markdown. Set `RUST_LOG=debug` to follow the
//! pipeline stages.
//!
//! Usage: `headline-clusters`

use headline_clusters::{
    serve, FrontPageSource, PageConfig, Pipeline, PipelineConfig, SourceConfig, TerminalPresenter,
};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Process-wide setup, done once before the first run
    env_logger::init();

    let pipeline = Pipeline::new(PipelineConfig::default());
    let mut source = FrontPageSource::new(SourceConfig::default())?;
    let mut presenter = TerminalPresenter::new(io::stdin().lock(), io::stdout().lock());

    serve(&pipeline, &mut source, &mut presenter, &PageConfig::default())?;

    Ok(())
}
