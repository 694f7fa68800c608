use crate::model::{User, UserRequest, Username};
use crate::transport::{ApiClient, ApiError};
use tracing::{debug, instrument};

/// Client for the `/api/users` resource.
#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Looks up an existing user. An unregistered username fails with `ApiError::NotFound`.
    #[instrument(skip(self))]
    pub async fn login(&self, username: &Username) -> Result<User, ApiError> {
        debug!("Sending request");
        self.api
            .post_json(&["api", "users", "login"], &UserRequest { username })
            .await
    }

    /// Registers a new user. A taken username fails with `ApiError::Conflict`.
    #[instrument(skip(self))]
    pub async fn create_user(&self, username: &Username) -> Result<User, ApiError> {
        debug!("Sending request");
        self.api
            .post_json(&["api", "users"], &UserRequest { username })
            .await
    }
}
