use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{LanguageEntry, QuerySource};
use crate::layout::is_safe_identifier;

/// Some hosts reject libcurl's default client identifier.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "queries";

/// Per-request HTTP parameters (optional `[request]` section in a manifest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Redirect hop limit.
    pub max_redirections: u32,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirections: 10,
        }
    }
}

/// Run configuration. Defaults reproduce the built-in behavior; a TOML
/// manifest may override any field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory that receives one subdirectory per language.
    pub output_root: PathBuf,
    /// Built-in catalog used when `languages` is empty.
    pub source: QuerySource,
    /// Explicit ordered entry list; overrides `source` when non-empty.
    pub languages: Vec<LanguageEntry>,
    /// HTTP request parameters.
    pub request: RequestOptions,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            source: QuerySource::default(),
            languages: Vec::new(),
            request: RequestOptions::default(),
        }
    }
}

impl FetchConfig {
    /// Load a manifest from `path`. Missing fields take their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let cfg: FetchConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        tracing::info!("loaded manifest from {}", path.display());
        Ok(cfg)
    }

    /// The ordered entries this run will fetch.
    pub fn entries(&self) -> Vec<LanguageEntry> {
        if self.languages.is_empty() {
            self.source.entries()
        } else {
            self.languages.clone()
        }
    }

    /// Reject configurations the runner cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.request.timeout_secs == 0 {
            bail!("request timeout must be at least 1 second");
        }
        let mut seen = HashSet::new();
        for entry in self.entries() {
            if !is_safe_identifier(&entry.name) {
                bail!("language identifier {:?} is not a safe directory name", entry.name);
            }
            if !seen.insert(entry.name.clone()) {
                bail!("language {:?} is configured more than once", entry.name);
            }
            let parsed = url::Url::parse(&entry.url)
                .with_context(|| format!("invalid URL for {}: {}", entry.name, entry.url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!(
                    "unsupported URL scheme {:?} for {}",
                    parsed.scheme(),
                    entry.name
                );
            }
        }
        Ok(())
    }
}
