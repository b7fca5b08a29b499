//! Driving port for the collaboration handshake.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, InviteCode, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollaborationAuth: Send + Sync {
    /// Issue a token letting `user_id` join the room named by `room`.
    ///
    /// Callers must already hold an authenticated principal; there is no
    /// anonymous variant.
    async fn authorize(&self, user_id: &UserId, room: &InviteCode) -> Result<Value, Error>;
}
