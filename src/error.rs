//! Error conditions surfaced by the session engine

use thiserror::Error;

/// Failures reported to the immediate caller.
///
/// Invalid-state requests (stopping a stopped clock, submitting a score that
/// does not improve the board) are not errors and never produce one of these.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No runtime was reachable to host the clock's tick stream.
    #[error("scheduling unavailable: {0}")]
    SchedulingUnavailable(String),
    /// A snapshot could not be decoded or failed validation.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
    /// A value could not be serialized for storage.
    #[error("failed to encode: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, SessionError>;
