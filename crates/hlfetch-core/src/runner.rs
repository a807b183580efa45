//! Sequential fetch loop over the configured languages.
//!
//! Each entry is fetched on its own: a failure is recorded for that language
//! and the loop moves on. Nothing is retried.

use crate::catalog::LanguageEntry;
use crate::config::RequestOptions;
use crate::error::{ErrorKind, FetchError};
use crate::http;
use crate::layout::OutputLayout;
use crate::storage::PartFile;
use std::path::{Path, PathBuf};

/// Outcome of fetching one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { bytes: u64, path: PathBuf },
    Failure { kind: ErrorKind, reason: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Per-entry progress, delivered in table order.
#[derive(Debug, Clone, Copy)]
pub enum FetchEvent<'a> {
    Started { entry: &'a LanguageEntry },
    Saved { entry: &'a LanguageEntry, path: &'a Path, bytes: u64 },
    Failed { entry: &'a LanguageEntry, reason: &'a str },
}

/// Results of a run, in table order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub results: Vec<(String, FetchOutcome)>,
    /// Path of the advisory `.gitignore`, if it was written.
    pub gitignore: Option<PathBuf>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Identifiers whose fetch failed, in table order.
    pub fn failed_languages(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, o)| !o.is_success())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn outcome(&self, language: &str) -> Option<&FetchOutcome> {
        self.results
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, o)| o)
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|(_, o)| o.is_success())
    }

    /// Process exit status: 0 only if every language was fetched.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}

/// Fetches each entry into an [`OutputLayout`].
pub struct FetchRunner {
    layout: OutputLayout,
    request: RequestOptions,
}

impl FetchRunner {
    pub fn new(layout: OutputLayout, request: RequestOptions) -> Self {
        Self { layout, request }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Fetch every entry in order, then write the advisory `.gitignore`.
    pub fn run(&self, entries: &[LanguageEntry]) -> RunSummary {
        self.run_with_events(entries, |_| {})
    }

    /// Like [`run`](Self::run), reporting progress through `on_event`.
    pub fn run_with_events<F>(&self, entries: &[LanguageEntry], mut on_event: F) -> RunSummary
    where
        F: FnMut(FetchEvent<'_>),
    {
        tracing::info!(
            root = %self.layout.root().display(),
            count = entries.len(),
            "fetching highlight queries"
        );
        let mut summary = RunSummary::default();

        for entry in entries {
            on_event(FetchEvent::Started { entry });
            let outcome = match self.fetch_one(entry) {
                Ok((path, bytes)) => {
                    tracing::info!(language = %entry.name, bytes, path = %path.display(), "saved");
                    on_event(FetchEvent::Saved {
                        entry,
                        path: &path,
                        bytes,
                    });
                    FetchOutcome::Success { bytes, path }
                }
                Err(e) => {
                    let reason = e.reason();
                    tracing::warn!(language = %entry.name, url = %entry.url, kind = ?e.kind(), "fetch failed: {}", reason);
                    on_event(FetchEvent::Failed {
                        entry,
                        reason: &reason,
                    });
                    FetchOutcome::Failure {
                        kind: e.kind(),
                        reason,
                    }
                }
            };
            summary.results.push((entry.name.clone(), outcome));
        }

        match self.layout.write_gitignore() {
            Ok(path) => summary.gitignore = Some(path),
            Err(e) => tracing::warn!("could not write advisory .gitignore: {}", e.reason()),
        }

        tracing::info!(
            succeeded = summary.succeeded(),
            total = summary.total(),
            "fetch run finished"
        );
        summary
    }

    /// Fetch one entry into its destination. Returns the path and byte count.
    pub fn fetch_one(&self, entry: &LanguageEntry) -> Result<(PathBuf, u64), FetchError> {
        self.layout.ensure_language_dir(&entry.name)?;
        let dest = self.layout.query_path(&entry.name);
        tracing::debug!(language = %entry.name, url = %entry.url, "GET");

        let mut part = PartFile::create(&dest)?;
        match http::get(&entry.url, &self.request, |data| part.write_chunk(data)) {
            Ok(_) => {
                let bytes = part.finalize(&dest)?;
                Ok((dest, bytes))
            }
            Err(e) => {
                part.discard();
                Err(e)
            }
        }
    }
}
