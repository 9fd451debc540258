//! Errors of the transformation.
//!
//! Malformed but parseable input never fails: structural mismatches are
//! dropped and unsupported values replaced by defaults, with a log record.
//! Only violations of the engine's own invariants surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Absent {child} result routed into a {parent} worker as if it were a node")]
    AbsentResult { child: String, parent: String },

    #[error("Exit event without a matching enter")]
    UnbalancedExit,

    #[error("{0} element(s) still open at end of input")]
    Unclosed(usize),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
