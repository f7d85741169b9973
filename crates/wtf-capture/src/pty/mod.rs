mod wrapper;

pub use wrapper::{PtySession, PtyShellConfig, RecordedSession};
