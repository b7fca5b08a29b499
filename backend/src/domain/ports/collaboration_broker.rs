//! Port for the realtime collaboration session broker.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{InviteCode, PresenceProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by collaboration broker adapters.
    pub enum CollaborationBrokerError {
        /// No broker credentials are configured for this deployment.
        NotConfigured => "collaboration broker is not configured",
        /// The broker could not be reached.
        Transport { message: String } => "collaboration broker unreachable: {message}",
        /// The broker answered with a failure status.
        Rejected { status: u16, message: String } =>
            "collaboration broker rejected the request ({status}): {message}",
    }
}

/// Capability request: one authenticated principal, one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborationGrant {
    pub principal: PresenceProfile,
    pub room: InviteCode,
}

/// Issues room-scoped access tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollaborationSessionBroker: Send + Sync {
    /// Request a token granting `grant.principal` full access to `grant.room` only.
    ///
    /// The broker's JSON answer is returned untouched for the client SDK.
    async fn authorize(&self, grant: &CollaborationGrant) -> Result<Value, CollaborationBrokerError>;
}

/// Broker used when no secret key is configured; refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCollaborationBroker;

#[async_trait]
impl CollaborationSessionBroker for DisabledCollaborationBroker {
    async fn authorize(&self, _grant: &CollaborationGrant) -> Result<Value, CollaborationBrokerError> {
        Err(CollaborationBrokerError::not_configured())
    }
}
