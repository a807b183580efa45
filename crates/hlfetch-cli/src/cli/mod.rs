//! CLI for hlfetch.

mod report;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use hlfetch_core::catalog::QuerySource;
use hlfetch_core::config::FetchConfig;
use hlfetch_core::layout::OutputLayout;
use hlfetch_core::runner::FetchRunner;
use std::path::PathBuf;

/// Download tree-sitter `highlights.scm` queries into `<output>/<language>/`.
#[derive(Debug, Parser)]
#[command(name = "hlfetch", version)]
#[command(about = "Fetch tree-sitter highlight queries", long_about = None)]
pub struct Cli {
    /// Output root directory (default: ./queries).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// TOML manifest overriding the built-in language table and request settings.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Built-in catalog to fetch from.
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Request timeout in seconds (default: 30).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the configured languages and URLs without fetching.
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    TreeSitter,
    NvimTreesitter,
}

impl From<SourceArg> for QuerySource {
    fn from(s: SourceArg) -> Self {
        match s {
            SourceArg::TreeSitter => QuerySource::TreeSitter,
            SourceArg::NvimTreesitter => QuerySource::NvimTreesitter,
        }
    }
}

impl Cli {
    /// Parse arguments, run, and return the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        cli.run()
    }

    /// Resolve the effective configuration: flags over manifest over defaults.
    pub fn resolve_config(&self) -> Result<FetchConfig> {
        let mut cfg = match &self.config {
            Some(path) => FetchConfig::load_from_path(path)?,
            None => FetchConfig::default(),
        };
        if let Some(output) = &self.output {
            cfg.output_root = output.clone();
        }
        if let Some(source) = self.source {
            cfg.source = source.into();
        }
        if let Some(timeout) = self.timeout {
            cfg.request.timeout_secs = timeout;
        }
        cfg.validate()?;
        tracing::debug!("resolved config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn run(&self) -> Result<i32> {
        let cfg = self.resolve_config()?;
        let entries = cfg.entries();

        if self.list {
            report::print_list(&entries);
            return Ok(0);
        }

        let layout = OutputLayout::new(&cfg.output_root);
        report::print_header(layout.root());
        let runner = FetchRunner::new(layout, cfg.request.clone());
        let summary = runner.run_with_events(&entries, report::print_event);
        report::print_summary(&summary, runner.layout());

        Ok(summary.exit_code())
    }
}
