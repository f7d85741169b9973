use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct InitArgs {
    /// Shell to emit the snippet for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Shell {
    Zsh,
    Bash,
}

/// Print the rc-file snippet implementing the two-phase bootstrap: an
/// unwrapped interactive shell replaces itself with `wtf record`, which
/// re-runs the shell with WTF_TRANSCRIPT set, so the second pass falls
/// through to normal startup.
pub fn run(args: &InitArgs) -> Result<i32> {
    // zsh and bash share the guard syntax.
    let (name, rc_file) = match args.shell {
        Shell::Zsh => ("zsh", "~/.zshrc"),
        Shell::Bash => ("bash", "~/.bashrc"),
    };
    println!(
        r#"# wtf shell integration: add `eval "$(wtf init {name})"` to {rc_file}.
if [[ $- == *i* ]] && [ -z "${{WTF_TRANSCRIPT-}}" ] && command -v wtf >/dev/null; then
    exec wtf record
fi"#
    );
    Ok(0)
}
