//! Resource error types.

/// Errors that can occur while loading a resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// No file data is registered under the requested name.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// File data exists but could not be decoded as the requested kind.
    #[error("failed to decode resource `{name}`: {reason}")]
    Decode {
        /// Logical resource name.
        name: String,
        /// Decoder message.
        reason: String,
    },
}
