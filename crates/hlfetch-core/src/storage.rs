//! Destination file lifecycle.
//!
//! Bodies are streamed into `<dest>.part` and renamed over the destination
//! only after the whole response arrived, so a failed fetch never clobbers a
//! previously downloaded query file.

use crate::error::FetchError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// A temp file being filled with a response body.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> Result<Self, FetchError> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| FetchError::io(&temp_path, e))?;
        Ok(PartFile {
            file,
            temp_path,
            written: 0,
        })
    }

    /// Append a chunk of body bytes.
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<(), FetchError> {
        self.file
            .write_all(data)
            .map_err(|e| FetchError::io(&self.temp_path, e))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Sync and rename the temp file over `final_path`. Returns the byte count.
    /// On failure the temp file is removed.
    pub fn finalize(self, final_path: &Path) -> Result<u64, FetchError> {
        let PartFile {
            file,
            temp_path,
            written,
        } = self;
        let synced = file.sync_all().map_err(|e| FetchError::io(&temp_path, e));
        drop(file);

        let result = synced.and_then(|()| {
            std::fs::rename(&temp_path, final_path).map_err(|e| FetchError::io(final_path, e))
        });
        if let Err(e) = result {
            remove_temp(&temp_path);
            return Err(e);
        }
        Ok(written)
    }

    /// Remove the temp file; the destination is left untouched.
    pub fn discard(self) {
        let PartFile { file, temp_path, .. } = self;
        drop(file);
        remove_temp(&temp_path);
    }
}

fn remove_temp(temp_path: &Path) {
    if let Err(e) = std::fs::remove_file(temp_path) {
        tracing::debug!(path = %temp_path.display(), "could not remove temp file: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("highlights.scm"));
        assert_eq!(p.to_string_lossy(), "highlights.scm.part");
        let p2 = temp_path(Path::new("/tmp/queries/c/highlights.scm"));
        assert_eq!(p2.to_string_lossy(), "/tmp/queries/c/highlights.scm.part");
    }

    #[test]
    fn write_and_finalize_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("highlights.scm");
        std::fs::write(&dest, b"old content that is longer").unwrap();

        let mut part = PartFile::create(&dest).unwrap();
        part.write_chunk(b"(identifier) ").unwrap();
        part.write_chunk(b"@variable").unwrap();
        assert_eq!(part.written(), 22);
        let tp = part.temp_path().to_path_buf();
        let n = part.finalize(&dest).unwrap();

        assert_eq!(n, 22);
        assert!(!tp.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"(identifier) @variable");
    }

    #[test]
    fn discard_keeps_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("highlights.scm");
        std::fs::write(&dest, b"previous").unwrap();

        let mut part = PartFile::create(&dest).unwrap();
        part.write_chunk(b"partial").unwrap();
        let tp = part.temp_path().to_path_buf();
        part.discard();

        assert!(!tp.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("highlights.scm");
        std::fs::create_dir(&dest).unwrap();
        std::fs::write(dest.join("keep"), b"x").unwrap();

        let mut part = PartFile::create(&dest).unwrap();
        part.write_chunk(b"(comment) @comment").unwrap();
        let tp = part.temp_path().to_path_buf();
        let err = part.finalize(&dest).unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::LocalIo);
        assert!(!tp.exists());
        assert!(dest.is_dir());
    }

    #[test]
    fn create_in_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("highlights.scm");
        let err = PartFile::create(&dest).err().expect("should fail");
        assert_eq!(err.kind(), crate::error::ErrorKind::LocalIo);
    }
}
