//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeolayerTypesError {
    /// A projection cannot be constructed from the given parameters.
    #[error("invalid projection parameters: {0}")]
    InvalidProjection(String),
}
