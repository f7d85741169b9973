use anyhow::{Context, Result};

use wtf_core::{transcript_from_env, WtfConfig};
use wtf_prompt::{assemble_prompt, gather_code_context, tail_history, EnvironmentFacts};

use crate::dispatch;

/// Phase 2: assemble the prompt from the transcript tail, environment
/// facts, and nearby source files, then pipe it to the model client.
pub fn run() -> Result<i32> {
    let config = WtfConfig::load();
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let history = match transcript_from_env() {
        Some(path) => tail_history(&path, config.context_lines, config.history_byte_limit()),
        None => {
            tracing::warn!("no recording session found; terminal history will be empty");
            String::new()
        }
    };

    let facts = EnvironmentFacts::gather(&cwd);
    let code_context = gather_code_context(&cwd);
    let prompt = assemble_prompt(&history, &facts, &code_context);

    tracing::debug!("assembled prompt: {} bytes", prompt.len());

    dispatch::run_client(&config.client, &config.client_args, &prompt)
}
