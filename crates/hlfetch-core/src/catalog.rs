//! Built-in language tables.
//!
//! Each table is an ordered list of `(identifier, URL)` pairs. Order is the
//! order in which the runner fetches and reports.

use serde::{Deserialize, Serialize};

/// Languages shipped in every built-in catalog, in fetch order.
pub const LANGUAGES: [&str; 6] = ["c", "cpp", "go", "javascript", "typescript", "rust"];

const TREE_SITTER_BASE: &str = "https://raw.githubusercontent.com/tree-sitter";
const NVIM_TREESITTER_BASE: &str =
    "https://raw.githubusercontent.com/nvim-treesitter/nvim-treesitter/master/queries";

/// One configured language: where its highlight query lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Language identifier; also the output directory name.
    pub name: String,
    /// Source URL of the `highlights.scm` file.
    pub url: String,
    /// Upstream branch the URL points at. Informational only.
    #[serde(default)]
    pub branch: Option<String>,
}

impl LanguageEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

/// Which upstream to pull queries from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuerySource {
    /// Per-grammar repositories under the tree-sitter organization.
    #[default]
    TreeSitter,
    /// The nvim-treesitter query collection.
    NvimTreesitter,
}

impl QuerySource {
    /// The ordered entry table for this source.
    pub fn entries(self) -> Vec<LanguageEntry> {
        LANGUAGES
            .iter()
            .map(|lang| match self {
                QuerySource::TreeSitter => LanguageEntry::new(
                    *lang,
                    format!("{TREE_SITTER_BASE}/tree-sitter-{lang}/master/queries/highlights.scm"),
                )
                .with_branch("master"),
                QuerySource::NvimTreesitter => LanguageEntry::new(
                    *lang,
                    format!("{NVIM_TREESITTER_BASE}/{lang}/highlights.scm"),
                )
                .with_branch("master"),
            })
            .collect()
    }
}
