//! Error types for the cart store.

use crate::transport::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    /// The backend or the network failed; passed through untouched.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The cart changed on the backend but could not be re-fetched afterwards.
    #[error("Cart changed but could not be reloaded: {0}")]
    Stale(Box<CartError>),

    /// An error occurred while communicating with the store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
