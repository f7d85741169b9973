use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use portable_pty::{native_pty_system, CommandBuilder, PtySize};

use wtf_core::session::TRANSCRIPT_ENV;

use crate::error::CaptureError;

/// Configuration for a PTY-wrapped shell session.
#[derive(Debug, Clone)]
pub struct PtyShellConfig {
    pub shell: String,
    pub working_dir: PathBuf,
    pub transcript_path: PathBuf,
}

/// Result of a recorded shell session.
#[derive(Debug, Clone)]
pub struct RecordedSession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub exit_code: Option<u32>,
    pub bytes_recorded: u64,
}

/// A PTY session that runs the user's shell and tees all terminal output
/// to the session transcript. The transcript has a single writer (the
/// reader thread here); `wtf ask` only ever tail-reads it.
pub struct PtySession {
    config: PtyShellConfig,
    start_time: DateTime<Utc>,
}

impl PtySession {
    pub fn start(config: PtyShellConfig) -> Result<Self, CaptureError> {
        Ok(Self {
            config,
            start_time: Utc::now(),
        })
    }

    /// Run the shell to completion. Spawns it in a PTY with the transcript
    /// marker exported, passes stdin/stdout through, appends output to the
    /// transcript file.
    pub fn run(self) -> Result<RecordedSession, CaptureError> {
        let pty_system = native_pty_system();

        // Get terminal size from current terminal, fall back to defaults
        let (cols, rows) = terminal_size().unwrap_or((80, 24));

        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| CaptureError::Pty(format!("Failed to open PTY: {e}")))?;

        let mut cmd = CommandBuilder::new(&self.config.shell);
        cmd.cwd(&self.config.working_dir);
        // The nested shell (and everything it runs) sees the marker, so the
        // init snippet will not re-exec the recorder and `wtf ask` can find
        // the transcript.
        cmd.env(TRANSCRIPT_ENV, &self.config.transcript_path);

        let mut child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| CaptureError::Pty(format!("Failed to spawn shell: {e}")))?;

        // Drop the slave to avoid hanging
        drop(pair.slave);

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| CaptureError::Pty(format!("Failed to clone PTY reader: {e}")))?;
        let mut writer = pair
            .master
            .take_writer()
            .map_err(|e| CaptureError::Pty(format!("Failed to take PTY writer: {e}")))?;

        let mut transcript = OpenOptions::new()
            .append(true)
            .open(&self.config.transcript_path)?;

        let bytes_recorded = Arc::new(AtomicU64::new(0));
        let bytes_clone = Arc::clone(&bytes_recorded);

        // Reader thread: PTY output -> terminal + transcript file
        let reader_handle = std::thread::spawn(move || {
            let mut buf = [0u8; 4096];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        let _ = std::io::stdout().write_all(&buf[..n]);
                        let _ = std::io::stdout().flush();
                        if transcript.write_all(&buf[..n]).is_ok() {
                            bytes_clone.fetch_add(n as u64, Ordering::Relaxed);
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = transcript.flush();
        });

        // Shutdown flag so we can signal the writer thread to stop
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_writer = Arc::clone(&shutdown);

        // Writer thread: stdin -> PTY
        let writer_handle = std::thread::spawn(move || {
            let mut buf = [0u8; 4096];
            loop {
                if shutdown_writer.load(Ordering::Relaxed) {
                    break;
                }
                match std::io::stdin().read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if writer.write_all(&buf[..n]).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        let status = child
            .wait()
            .map_err(|e| CaptureError::Pty(format!("Failed to wait for shell: {e}")))?;

        let _ = reader_handle.join();

        // Signal the writer to stop. It may be blocked on stdin.read(),
        // which cannot be interrupted portably; it lingers until process
        // exit at worst.
        shutdown.store(true, Ordering::Relaxed);
        let _ = writer_handle.join();

        let end_time = Utc::now();
        let bytes = bytes_recorded.load(Ordering::Relaxed);
        tracing::debug!("recorded {bytes} bytes of terminal output");

        Ok(RecordedSession {
            start_time: self.start_time,
            end_time,
            exit_code: Some(status.exit_code()),
            bytes_recorded: bytes,
        })
    }
}

/// Try to get the current terminal size from environment variables.
fn terminal_size() -> Option<(u16, u16)> {
    let cols = std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<u16>().ok());
    let rows = std::env::var("LINES")
        .ok()
        .and_then(|v| v.parse::<u16>().ok());

    match (cols, rows) {
        (Some(c), Some(r)) if c > 0 && r > 0 => Some((c, r)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_shell_output_reaches_transcript() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = PtyShellConfig {
            shell: "/bin/sh".into(),
            working_dir: std::env::temp_dir(),
            transcript_path: file.path().to_path_buf(),
        };

        // Run a shell that prints a marker and exits immediately. The PTY
        // reader thread must tee that output into the transcript file.
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .unwrap();
        let mut cmd = CommandBuilder::new(&config.shell);
        cmd.args(["-c", "echo wtf-marker"]);
        cmd.cwd(&config.working_dir);
        let mut child = pair.slave.spawn_command(cmd).unwrap();
        drop(pair.slave);

        let mut reader = pair.master.try_clone_reader().unwrap();
        let mut transcript = OpenOptions::new()
            .append(true)
            .open(&config.transcript_path)
            .unwrap();
        // The master read errors with EIO once the child exits; treat it
        // like EOF, as the reader thread does.
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => transcript.write_all(&buf[..n]).unwrap(),
            }
        }
        child.wait().unwrap();

        let recorded = std::fs::read_to_string(file.path()).unwrap();
        assert!(recorded.contains("wtf-marker"));
    }

    #[test]
    fn test_terminal_size_rejects_zero() {
        // terminal_size reads COLUMNS/LINES; zero or absent values must
        // fall through to the caller's 80x24 default.
        assert!(matches!(terminal_size(), None | Some((1.., 1..))));
    }
}
