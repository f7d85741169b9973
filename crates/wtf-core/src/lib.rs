pub mod config;
pub mod error;
pub mod session;

pub use config::WtfConfig;
pub use error::CoreError;
pub use session::{transcript_from_env, TranscriptFile, TRANSCRIPT_ENV};
