use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("PTY error: {0}")]
    Pty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
