use crate::environment::EnvironmentFacts;

/// Interpolate the transcript tail, environment facts, and code context
/// into the fixed prompt template. Pure function, no side effects.
pub fn assemble_prompt(history: &str, facts: &EnvironmentFacts, code_context: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a debugging assistant for a beginner working in an \
         interactive terminal. Below is the recent terminal history, some \
         system information, and the source files in the current directory. \
         Explain only the most recent error in the terminal history and how \
         to fix it. Keep the answer under 10 lines, formatted as markdown. \
         Ignore the system information and source files unless they are \
         relevant to the error.\n\n",
    );

    prompt.push_str("## Terminal history (most recent last)\n\n");
    prompt.push_str(history);
    prompt.push_str("\n\n## System\n\n");
    prompt.push_str(&format!("OS: {}\n", facts.os));
    prompt.push_str(&format!("Working directory: {}\n", facts.cwd.display()));
    prompt.push_str("Directory listing:\n");
    prompt.push_str(&facts.listing);

    if !code_context.is_empty() {
        prompt.push_str("\n\n## Source files in the current directory\n\n");
        prompt.push_str(code_context);
    }
    prompt.push('\n');

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn facts() -> EnvironmentFacts {
        EnvironmentFacts {
            os: "Debian GNU/Linux 12 x86_64".into(),
            cwd: PathBuf::from("/home/user/project"),
            listing: "main.py\nREADME.md".into(),
        }
    }

    #[test]
    fn test_history_appears_verbatim() {
        let prompt = assemble_prompt("python: command not found", &facts(), "");
        assert!(prompt.contains("python: command not found"));
    }

    #[test]
    fn test_template_sections() {
        let prompt = assemble_prompt("history", &facts(), "main.py\nprint(1)\n---");
        assert!(prompt.contains("most recent error"));
        assert!(prompt.contains("Terminal history"));
        assert!(prompt.contains("OS: Debian GNU/Linux 12 x86_64"));
        assert!(prompt.contains("Working directory: /home/user/project"));
        assert!(prompt.contains("Source files"));
        assert!(prompt.contains("print(1)"));
    }

    #[test]
    fn test_code_section_omitted_when_empty() {
        let prompt = assemble_prompt("history", &facts(), "");
        assert!(!prompt.contains("Source files"));
    }

    #[test]
    fn test_escape_sequences_pass_through() {
        let prompt = assemble_prompt("\x1b[31merror\x1b[0m", &facts(), "");
        assert!(prompt.contains("\x1b[31m"));
    }
}
