//! Error types for the todo client.
//!
//! # Design
//! Two layers. `ApiError` describes what went wrong on one request/response
//! round trip and is only ever shown on the diagnostic channel. `SyncError` is
//! what the user sees: a load failure or a fixed per-operation mutation
//! message. Every `ApiError` collapses into exactly one `SyncError`.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connect, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Which mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

/// User-facing failure of a synchronization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The initial list request failed. Never blocks the user.
    #[error("Failed to load todos")]
    LoadFailure,

    /// A create/update/delete failed; local state was left untouched.
    #[error("{}", .0.failure_message())]
    MutationFailure(Mutation),
}

impl Mutation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Mutation::Create => "Failed to add todo",
            Mutation::Update => "Failed to update todo",
            Mutation::Delete => "Failed to delete todo",
        }
    }
}
