//! Error types for the gate layer.

/// Errors that can occur while navigating.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// `back()` was called with nothing on the history stack.
    #[error("no previous route to go back to")]
    NoHistory,
}
