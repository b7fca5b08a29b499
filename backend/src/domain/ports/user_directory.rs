//! Driving port for user lookups shown by the editor UI.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, PresenceProfile, User, UserId};

/// Maximum number of emails returned by a search.
pub const USER_SEARCH_LIMIT: usize = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Profile of the signed-in user.
    async fn current_user(&self, id: &UserId) -> Result<User, Error>;

    /// Emails containing `text`, sorted, at most [`USER_SEARCH_LIMIT`].
    async fn search_emails(&self, text: &str) -> Result<Vec<EmailAddress>, Error>;

    /// Presence profiles for known emails, in request order.
    async fn presence(&self, emails: &[EmailAddress]) -> Result<Vec<PresenceProfile>, Error>;
}
