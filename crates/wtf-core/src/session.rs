use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::CoreError;

/// Environment variable carrying the transcript path into the recorded
/// shell. Doubles as the bootstrap guard: when set, the session is already
/// wrapped and the init snippet must not re-exec the recorder.
pub const TRANSCRIPT_ENV: &str = "WTF_TRANSCRIPT";

/// The per-session transcript file. Created once by `wtf record`, written
/// by the PTY recorder, tail-read by the prompt assembler, and deleted when
/// the session ends.
///
/// The file is owner read/write only (tempfile creates mode 600 on Unix)
/// and uniquely named. Dropping the handle removes the file; `remove` does
/// the same explicitly for the signal-cleanup path.
pub struct TranscriptFile {
    inner: Option<NamedTempFile>,
    path: PathBuf,
}

impl TranscriptFile {
    /// Create the transcript file in the system temp directory. Creation
    /// failure is fatal to the recorder bootstrap and propagates as-is.
    pub fn create() -> Result<Self, CoreError> {
        let inner = tempfile::Builder::new()
            .prefix("wtf-session-")
            .suffix(".log")
            .tempfile()?;
        let path = inner.path().to_path_buf();
        tracing::debug!("created transcript file at {}", path.display());
        Ok(Self {
            inner: Some(inner),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the transcript file now instead of waiting for drop.
    pub fn remove(&mut self) -> Result<(), CoreError> {
        if let Some(file) = self.inner.take() {
            file.close()?;
        }
        Ok(())
    }
}

/// Locate the active session's transcript via the marker variable.
/// Returns `None` when the shell is not running under `wtf record`.
pub fn transcript_from_env() -> Option<PathBuf> {
    std::env::var_os(TRANSCRIPT_ENV).map(PathBuf::from)
}
