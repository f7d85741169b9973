use anyhow::{Context, Result};
use clap::Args;
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

use wtf_capture::{PtySession, PtyShellConfig};
use wtf_core::{transcript_from_env, TranscriptFile, WtfConfig};

#[derive(Args)]
pub struct RecordArgs {
    /// Shell to run inside the recorder (default: $SHELL)
    #[arg(long)]
    pub shell: Option<String>,
}

/// Phase 1 of the bootstrap: create the transcript file, run the user's
/// shell under the PTY recorder, delete the transcript when the shell
/// exits, and propagate the shell's exit code.
pub fn run(args: &RecordArgs) -> Result<i32> {
    if transcript_from_env().is_some() {
        anyhow::bail!("This shell is already being recorded (WTF_TRANSCRIPT is set).");
    }

    let config = WtfConfig::load();
    let shell = args.shell.clone().unwrap_or(config.shell);
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;

    // The transcript must not outlive the session even when the recorder
    // dies by signal (terminal closed, kill). Registered before the file
    // exists so no delivery window is missed; SIGKILL stays uncovered.
    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("Failed to register signal handlers")?;

    let mut transcript = TranscriptFile::create().context("Failed to create transcript file")?;
    let transcript_path = transcript.path().to_path_buf();

    let cleanup_path = transcript_path.clone();
    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let _ = std::fs::remove_file(&cleanup_path);
            std::process::exit(128 + sig);
        }
    });

    tracing::info!("recording session: {shell}");

    let session = PtySession::start(PtyShellConfig {
        shell,
        working_dir,
        transcript_path,
    })
    .context("Failed to start PTY session")?;
    let recorded = session.run().context("PTY session failed")?;

    transcript
        .remove()
        .context("Failed to remove transcript file")?;

    let duration = recorded.end_time - recorded.start_time;
    tracing::info!(
        "session ended after {:.1}s ({} bytes recorded)",
        duration.num_milliseconds() as f64 / 1000.0,
        recorded.bytes_recorded
    );

    Ok(recorded.exit_code.map(|c| c as i32).unwrap_or(0))
}
