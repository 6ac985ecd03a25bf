pub mod assemble;
mod audit;
mod constants;
mod options;
mod output;
mod types;

pub use assemble::{assemble, assemble_into, assemble_with_progress};
pub use audit::{WarningSummary, audit, audit_with_threshold, is_oversized, summarize_warnings};
pub use constants::*;
pub use options::*;
pub use output::OutputTarget;
pub use types::*;
