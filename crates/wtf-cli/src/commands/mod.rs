pub mod ask;
pub mod init;
pub mod record;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the shell integration snippet for your rc file
    Init(init::InitArgs),
    /// Run a shell inside the session recorder (phase 1 of the bootstrap)
    Record(record::RecordArgs),
    /// Explain the most recent shell error (default when no subcommand)
    Ask,
}
