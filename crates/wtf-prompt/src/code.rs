use std::path::Path;

/// Hard ceilings on the code-context section, applied after concatenation.
/// Earlier files can starve later ones of budget; that is a deliberate
/// simplicity/quality trade-off.
pub const CODE_CONTEXT_MAX_LINES: usize = 1000;
pub const CODE_CONTEXT_MAX_BYTES: usize = 8000;

/// Extensions recognized as script/source content.
const SOURCE_EXTENSIONS: &[&str] = &[
    "sh", "bash", "zsh", "py", "rb", "js", "jsx", "ts", "tsx", "go", "rs", "c", "h", "cpp", "hpp",
    "java", "pl", "php", "lua",
];

/// Collect source files from `dir` (non-recursive) into one bounded text
/// block: file name, full contents, separator, per match. Hidden files and
/// unrecognized extensions are skipped.
pub fn gather_code_context(dir: &Path) -> String {
    let mut entries: Vec<(String, std::path::PathBuf)> = Vec::new();
    if let Ok(read) = std::fs::read_dir(dir) {
        for entry in read.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let recognized = Path::new(&name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e.to_lowercase().as_str()));
            if recognized {
                entries.push((name, entry.path()));
            }
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut combined = String::new();
    for (name, path) in entries {
        let contents = match std::fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => continue,
        };
        combined.push_str(&name);
        combined.push('\n');
        combined.push_str(&contents);
        if !contents.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str("---\n");
    }

    truncate_code_context(combined)
}

fn truncate_code_context(combined: String) -> String {
    let mut text: String = combined
        .lines()
        .take(CODE_CONTEXT_MAX_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    if text.len() > CODE_CONTEXT_MAX_BYTES {
        let mut cut = CODE_CONTEXT_MAX_BYTES;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}
