//! Error types for the route guide service.
//!
//! This module defines the central `Error` enum, which captures the
//! reportable error cases within the service. It implements `From<Error>` for
//! `tonic::Status` to enable seamless gRPC error propagation to clients with
//! appropriate status codes and messages.
//!
//! Note that a feature lookup miss is *not* an error: `GetFeature` answers a
//! miss with an unnamed `Feature` at the requested point. Client disconnects
//! are not errors either; the streaming handlers observe the closed channel
//! and stop.
//!
//! ## Error Cases
//! - `DatabaseLoad`: The feature database could not be read at startup.
//! - `InvalidRequest`: The client request was malformed (e.g. a rectangle
//!   missing a corner).

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the route guide service.
#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
    /// The feature database file could not be read or parsed at startup.
    #[error("Database error: {context}")]
    DatabaseLoad { context: String },

    /// The client request was invalid or incomplete.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::DatabaseLoad { context } => {
                Status::internal(format!("Database error: {}", context))
            }
            Error::InvalidRequest { reason } => Status::invalid_argument(reason),
        }
    }
}
