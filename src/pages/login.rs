use super::FormStatus;
use crate::model::{User, Username};
use crate::services::UserService;
use crate::session::Session;
use tracing::{info, warn};

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USER_NOT_FOUND: &str = "User not found";
pub const SIGN_IN_FAILED: &str = "Could not sign in";
pub const CREATE_USER_FAILED: &str = "Could not create user";

/// The "create user" modal. Dropping it (cancel) discards both buffer and error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserModal {
    pub username: String,
    pub error: Option<String>,
    pub status: FormStatus,
}

/// Username-only login.
///
/// Success persists the identity through the [`Session`]; the caller then moves on to the
/// home page. Nothing is persisted on failure.
#[derive(Debug)]
pub struct LoginPage {
    users: UserService,
    username: String,
    error: Option<String>,
    status: FormStatus,
    create: Option<CreateUserModal>,
}

impl LoginPage {
    pub fn new(users: UserService) -> Self {
        Self {
            users,
            username: String::new(),
            error: None,
            status: FormStatus::Idle,
            create: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Editing the field clears a previous error.
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.error = None;
    }

    pub async fn submit_login(&mut self, session: &mut Session) -> Option<User> {
        let username = self.username.trim();
        if username.is_empty() {
            self.error = Some(USERNAME_REQUIRED.to_string());
            return None;
        }
        let username = Username::new(username);

        self.status = FormStatus::Submitting;
        let result = self.users.login(&username).await;
        self.status = FormStatus::Idle;

        match result {
            Ok(user) => match session.sign_in(user.username.clone()) {
                Ok(()) => {
                    info!(%username, "Logged in");
                    Some(user)
                }
                Err(e) => {
                    warn!(%username, error = %e, "Could not persist identity");
                    self.error = Some(SIGN_IN_FAILED.to_string());
                    None
                }
            },
            Err(e) if e.is_not_found() => {
                self.error = Some(USER_NOT_FOUND.to_string());
                None
            }
            Err(e) => {
                warn!(%username, error = %e, "Login failed");
                self.error = Some(SIGN_IN_FAILED.to_string());
                None
            }
        }
    }

    pub fn create_modal(&self) -> Option<&CreateUserModal> {
        self.create.as_ref()
    }

    pub fn open_create_user(&mut self) {
        self.create.get_or_insert_with(CreateUserModal::default);
    }

    pub fn cancel_create_user(&mut self) {
        self.create = None;
    }

    pub fn set_new_username(&mut self, value: impl Into<String>) {
        if let Some(modal) = self.create.as_mut() {
            modal.username = value.into();
            modal.error = None;
        }
    }

    /// Registers the user typed into the modal and signs in as them.
    pub async fn submit_create_user(&mut self, session: &mut Session) -> Option<User> {
        let modal = self.create.as_mut()?;
        let username = modal.username.trim();
        if username.is_empty() {
            modal.error = Some(USERNAME_REQUIRED.to_string());
            return None;
        }
        let username = Username::new(username);
        modal.status = FormStatus::Submitting;

        let user = match self.users.create_user(&username).await {
            Ok(user) => user,
            Err(e) => {
                warn!(%username, error = %e, "Create user failed");
                self.fail_create_user();
                return None;
            }
        };
        if let Err(e) = session.sign_in(user.username.clone()) {
            warn!(%username, error = %e, "Could not persist identity");
            self.fail_create_user();
            return None;
        }

        info!(%username, "User created");
        self.create = None;
        Some(user)
    }

    fn fail_create_user(&mut self) {
        if let Some(modal) = self.create.as_mut() {
            modal.status = FormStatus::Idle;
            modal.error = Some(CREATE_USER_FAILED.to_string());
        }
    }
}
