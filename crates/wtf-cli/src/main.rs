use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod dispatch;

#[derive(Parser)]
#[command(
    name = "wtf",
    version,
    about = "AI-assisted debugging of the most recent shell error"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Bare `wtf` is the user-facing command: no flags, no arguments.
    let exit_code = match cli.command.unwrap_or(commands::Commands::Ask) {
        commands::Commands::Init(args) => commands::init::run(&args)?,
        commands::Commands::Record(args) => commands::record::run(&args)?,
        commands::Commands::Ask => commands::ask::run()?,
    };
    std::process::exit(exit_code)
}
