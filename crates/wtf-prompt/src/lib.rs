pub mod assemble;
pub mod code;
pub mod environment;
pub mod history;

pub use assemble::assemble_prompt;
pub use code::{gather_code_context, CODE_CONTEXT_MAX_BYTES, CODE_CONTEXT_MAX_LINES};
pub use environment::EnvironmentFacts;
pub use history::tail_history;
