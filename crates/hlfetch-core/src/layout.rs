//! Output directory layout: `<root>/<language>/highlights.scm`.

use crate::error::FetchError;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of every downloaded query.
pub const QUERY_FILENAME: &str = "highlights.scm";

/// Advisory ignore file written to the output root.
pub const GITIGNORE_CONTENT: &str = "\
# Tree-sitter query files (auto-downloaded by hlfetch)
*/highlights.scm
*/*.part

# Comment out the lines above to track the downloaded queries
";

/// Returns true if `name` can be used as a single directory component.
///
/// Rejects empty names, `.`/`..`, leading dots, path separators, NUL and
/// control characters, and names longer than 255 bytes (Linux NAME_MAX).
pub fn is_safe_identifier(name: &str) -> bool {
    const NAME_MAX: usize = 255;

    !name.is_empty()
        && name.len() <= NAME_MAX
        && !name.starts_with('.')
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}

/// Paths under one output root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language_dir(&self, language: &str) -> PathBuf {
        self.root.join(language)
    }

    pub fn query_path(&self, language: &str) -> PathBuf {
        self.language_dir(language).join(QUERY_FILENAME)
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    /// Create the language directory (and the root) if absent. Idempotent.
    /// Names that are not a single safe path component are refused.
    pub fn ensure_language_dir(&self, language: &str) -> Result<PathBuf, FetchError> {
        if !is_safe_identifier(language) {
            return Err(FetchError::UnsafeName {
                name: language.to_string(),
            });
        }
        let dir = self.language_dir(language);
        fs::create_dir_all(&dir).map_err(|e| FetchError::io(&dir, e))?;
        Ok(dir)
    }

    /// Write the advisory `.gitignore`, overwriting any previous one.
    pub fn write_gitignore(&self) -> Result<PathBuf, FetchError> {
        fs::create_dir_all(&self.root).map_err(|e| FetchError::io(&self.root, e))?;
        let path = self.gitignore_path();
        fs::write(&path, GITIGNORE_CONTENT).map_err(|e| FetchError::io(&path, e))?;
        Ok(path)
    }
}
