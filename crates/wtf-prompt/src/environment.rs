use std::path::{Path, PathBuf};

/// Single-shot snapshot of the environment around the failing command.
/// Computed fresh per invocation, never cached.
#[derive(Debug, Clone)]
pub struct EnvironmentFacts {
    pub os: String,
    pub cwd: PathBuf,
    pub listing: String,
}

impl EnvironmentFacts {
    pub fn gather(cwd: &Path) -> Self {
        Self {
            os: detect_os(),
            cwd: cwd.to_path_buf(),
            listing: list_directory(cwd),
        }
    }
}

fn detect_os() -> String {
    #[cfg(target_os = "macos")]
    {
        let version = std::process::Command::new("sw_vers")
            .arg("-productVersion")
            .output()
            .ok()
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
            .unwrap_or_default();
        if version.is_empty() {
            format!("macOS {}", std::env::consts::ARCH)
        } else {
            format!("macOS {} {}", version, std::env::consts::ARCH)
        }
    }
    #[cfg(target_os = "linux")]
    {
        let pretty = std::fs::read_to_string("/etc/os-release")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("PRETTY_NAME="))
                    .and_then(|l| l.strip_prefix("PRETTY_NAME="))
                    .map(|v| v.trim_matches('"').to_string())
            })
            .unwrap_or_else(|| "Linux".into());
        format!("{pretty} {}", std::env::consts::ARCH)
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
    }
}

/// Non-recursive listing of `dir`, one entry per line, directories marked
/// with a trailing slash. Sorted for stable prompts.
fn list_directory(dir: &Path) -> String {
    let mut names = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let mut name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                name.push('/');
            }
            names.push(name);
        }
    }
    names.sort();
    names.join("\n")
}
