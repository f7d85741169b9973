pub mod error;
pub mod pty;

pub use error::CaptureError;
pub use pty::{PtySession, PtyShellConfig, RecordedSession};
