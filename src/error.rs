use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// This is not a JSON object.
    #[error("json value is not an object")]
    NotAnObject(serde_json::Value),
}
