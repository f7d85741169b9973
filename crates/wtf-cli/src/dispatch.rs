use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Pipe the prompt to the external model client's stdin and surface its
/// stdout/stderr directly on the terminal. No retry, no response parsing;
/// the client's exit code is returned as-is.
pub fn run_client(client: &str, args: &[String], prompt: &str) -> Result<i32> {
    let mut child = Command::new(client)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to launch model client `{client}`"))?;

    if let Some(mut stdin) = child.stdin.take() {
        // A client that exits without reading stdin closes the pipe; that
        // is its failure to report, not ours.
        if let Err(e) = stdin.write_all(prompt.as_bytes()) {
            tracing::debug!("client closed stdin early: {e}");
        }
    }

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for model client `{client}`"))?;
    Ok(status.code().unwrap_or(1))
}
