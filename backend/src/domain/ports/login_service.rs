//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to check credentials without importing
//! the identity store or the hashing primitive.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown emails fail with `not_found`; wrong passwords with
    /// `unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
