//! Driving port for account sign-up.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account; an email already in use fails with `conflict`.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
