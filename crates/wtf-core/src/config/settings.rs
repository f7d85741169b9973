use std::path::PathBuf;

use serde::Deserialize;

/// Default number of transcript lines fed to the prompt. The byte ceiling
/// is derived from this (`context_lines * 80`) so one abnormally long line
/// cannot dominate the prompt.
const DEFAULT_CONTEXT_LINES: usize = 100;

const DEFAULT_CLIENT: &str = "llm";

#[derive(Debug, Clone)]
pub struct WtfConfig {
    /// How many trailing transcript lines to include in the prompt.
    pub context_lines: usize,
    /// External language-model client; reads the prompt on stdin.
    pub client: String,
    /// Extra arguments passed to the client.
    pub client_args: Vec<String>,
    /// Shell spawned by `wtf record`.
    pub shell: String,
}

/// Fields the optional JSON config file may set. Absent fields fall
/// through to the resolution chain below.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileOverrides {
    context_lines: Option<usize>,
    client: Option<String>,
    client_args: Option<Vec<String>>,
    shell: Option<String>,
}

impl WtfConfig {
    /// Load config: optional JSON file, resolved against the environment.
    /// A missing or unparsable file degrades to defaults.
    ///
    /// Precedence per field: `WTF_*` variable > config file > default.
    /// For the shell the default itself comes from `$SHELL`, so the chain
    /// is `WTF_SHELL` > file > `$SHELL` > `/bin/sh`.
    pub fn load() -> Self {
        let file = Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|raw| match serde_json::from_str::<FileOverrides>(&raw) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!("ignoring unparsable config file: {e}");
                    None
                }
            })
            .unwrap_or_default();
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Byte ceiling for the history section.
    pub fn history_byte_limit(&self) -> usize {
        self.context_lines * 80
    }

    /// Path to `$XDG_CONFIG_HOME/wtf/config.json` (or `~/.config/...`).
    fn config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("wtf").join("config.json"))
    }

    fn resolve(file: FileOverrides, get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            context_lines: get("WTF_CONTEXT_LINES")
                .and_then(|v| v.parse().ok())
                .or(file.context_lines)
                .unwrap_or(DEFAULT_CONTEXT_LINES),
            client: get("WTF_CLIENT")
                .or(file.client)
                .unwrap_or_else(|| DEFAULT_CLIENT.to_string()),
            client_args: file.client_args.unwrap_or_default(),
            shell: get("WTF_SHELL")
                .or(file.shell)
                .or_else(|| get("SHELL"))
                .unwrap_or_else(|| "/bin/sh".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve_with(file: FileOverrides, pairs: &[(&str, &str)]) -> WtfConfig {
        let vars = env(pairs);
        WtfConfig::resolve(file, |k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve_with(FileOverrides::default(), &[]);
        assert_eq!(config.context_lines, 100);
        assert_eq!(config.history_byte_limit(), 8000);
        assert_eq!(config.client, "llm");
        assert!(config.client_args.is_empty());
        assert_eq!(config.shell, "/bin/sh");
    }

    #[test]
    fn test_env_overrides() {
        let config = resolve_with(
            FileOverrides::default(),
            &[
                ("WTF_CONTEXT_LINES", "50"),
                ("WTF_CLIENT", "sgpt"),
                ("SHELL", "/bin/zsh"),
            ],
        );
        assert_eq!(config.context_lines, 50);
        assert_eq!(config.history_byte_limit(), 4000);
        assert_eq!(config.client, "sgpt");
        assert_eq!(config.shell, "/bin/zsh");
    }

    #[test]
    fn test_wtf_shell_beats_everything() {
        let file: FileOverrides =
            serde_json::from_str(r#"{"shell": "/custom/sh"}"#).unwrap();
        let config = resolve_with(file, &[("WTF_SHELL", "/bin/bash"), ("SHELL", "/bin/zsh")]);
        assert_eq!(config.shell, "/bin/bash");
    }

    #[test]
    fn test_file_shell_survives_ambient_shell() {
        // Interactive sessions always export SHELL; it must only serve as
        // the default, never clobber an explicit config-file value.
        let file: FileOverrides =
            serde_json::from_str(r#"{"shell": "/custom/sh"}"#).unwrap();
        let config = resolve_with(file, &[("SHELL", "/bin/zsh")]);
        assert_eq!(config.shell, "/custom/sh");
    }

    #[test]
    fn test_env_beats_file_for_scalars() {
        let file: FileOverrides =
            serde_json::from_str(r#"{"context_lines": 25, "client": "sgpt"}"#).unwrap();
        let config = resolve_with(file, &[("WTF_CONTEXT_LINES", "10"), ("WTF_CLIENT", "aichat")]);
        assert_eq!(config.context_lines, 10);
        assert_eq!(config.client, "aichat");
    }

    #[test]
    fn test_bad_env_value_falls_through() {
        let file: FileOverrides = serde_json::from_str(r#"{"context_lines": 25}"#).unwrap();
        let config = resolve_with(file, &[("WTF_CONTEXT_LINES", "not-a-number")]);
        assert_eq!(config.context_lines, 25);
    }

    #[test]
    fn test_file_values_apply_without_env() {
        let file: FileOverrides = serde_json::from_str(
            r#"{"context_lines": 25, "client": "sgpt", "client_args": ["--no-cache"]}"#,
        )
        .unwrap();
        let config = resolve_with(file, &[]);
        assert_eq!(config.context_lines, 25);
        assert_eq!(config.client, "sgpt");
        assert_eq!(config.client_args, vec!["--no-cache"]);
        assert_eq!(config.shell, "/bin/sh");
    }
}
