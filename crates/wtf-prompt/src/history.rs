use std::path::Path;

/// Tail of the session transcript, bounded for prompt inclusion.
///
/// Order of operations: strip NUL bytes (PTY recorder artifacts that the
/// model mishandles), keep the last `max_lines` lines, then keep the
/// trailing `max_bytes` so one abnormally long line cannot dominate the
/// prompt. ANSI color/escape sequences are deliberately NOT stripped;
/// removing them degraded answer quality.
///
/// A missing transcript degrades to an empty history rather than an error.
pub fn tail_history(path: &Path, max_lines: usize, max_bytes: usize) -> String {
    let raw = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("transcript unreadable at {}: {e}", path.display());
            return String::new();
        }
    };
    truncate_history(&raw, max_lines, max_bytes)
}

fn truncate_history(raw: &[u8], max_lines: usize, max_bytes: usize) -> String {
    let cleaned: Vec<u8> = raw.iter().copied().filter(|&b| b != 0).collect();
    let text = String::from_utf8_lossy(&cleaned);

    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    let mut tail = lines[start..].join("\n");

    if tail.len() > max_bytes {
        let mut cut = tail.len() - max_bytes;
        while !tail.is_char_boundary(cut) {
            cut += 1;
        }
        tail = tail[cut..].to_string();
    }
    tail
}
