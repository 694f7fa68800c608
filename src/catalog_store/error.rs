//! Error types for the catalog store.

use super::CatalogActionResult;
use crate::transport::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend or the network failed; passed through untouched.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The change went through on the backend, but the listing could not be re-fetched
    /// afterwards. Retrying the action would repeat it.
    #[error("Change applied but the listing could not be reloaded: {error}")]
    Stale {
        result: CatalogActionResult,
        error: Box<CatalogError>,
    },

    /// The store answered with a result that does not belong to the requested action.
    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),

    /// An error occurred while communicating with the store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
