//! Scheduler-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("state store operation failed: {message}")]
    Store { message: String },

    #[error("user lookup failed: {user_id}")]
    UserLookup { user_id: String },

    #[error("notification send failed on {channel}: {message}")]
    Notification { channel: String, message: String },

    #[error("filing action failed: {message}")]
    Filing { message: String },

    #[error("filing action timed out after {seconds}s")]
    FilingTimeout { seconds: u64 },

    #[error("status transition rejected")]
    Transition(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
