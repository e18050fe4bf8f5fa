use std::fs;
use std::io;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

/// Exclusively owned scratch file holding one trial's transformed document.
///
/// The backing file lives in the system temp directory and is deleted when
/// the `Artifact` is dropped, so a candidate that is superseded, discarded,
/// or abandoned by an aborting search releases its storage without any
/// cleanup code on the exit path. The single winning artifact escapes this
/// fate through [`persist`](Artifact::persist).
#[derive(Debug)]
pub struct Artifact {
    file: NamedTempFile,
}

impl Artifact {
    /// Create an empty scratch file. `suffix` (e.g. `".pdf"`) is kept so
    /// external tools that sniff extensions behave the same as they would
    /// on the final output.
    pub fn create(suffix: &str) -> io::Result<Self> {
        let file = Builder::new().prefix("squeeze-").suffix(suffix).tempfile()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size_bytes(&self) -> io::Result<u64> {
        Ok(self.file.as_file().metadata()?.len())
    }

    /// Promote this artifact to `dest`, consuming it.
    ///
    /// Uses an atomic rename when `dest` is on the same filesystem as the
    /// scratch file; otherwise falls back to copy-then-delete-source (the
    /// temp file is removed when the returned handle drops).
    pub fn persist(self, dest: &Path) -> io::Result<()> {
        match self.file.persist(dest) {
            Ok(_) => Ok(()),
            Err(err) => {
                fs::copy(err.file.path(), dest)?;
                Ok(())
            }
        }
    }
}
