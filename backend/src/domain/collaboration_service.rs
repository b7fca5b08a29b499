//! Collaboration handshake service.
//!
//! Issues broker tokens for an authenticated user and one existing document
//! room. There is no anonymous path: callers without a principal are turned
//! away by the inbound adapter before this service runs.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::document_registry::map_document_error;
use crate::domain::ports::{
    CollaborationAuth, CollaborationBrokerError, CollaborationGrant, CollaborationSessionBroker,
    DocumentRepository, UserRepository,
};
use crate::domain::{Error, InviteCode, PresenceProfile, UserId, map_user_persistence_error};

fn map_broker_error(error: CollaborationBrokerError) -> Error {
    match error {
        CollaborationBrokerError::NotConfigured => {
            Error::service_unavailable("realtime collaboration is not configured")
        }
        CollaborationBrokerError::Transport { message } => {
            Error::bad_gateway(format!("collaboration broker unreachable: {message}"))
        }
        CollaborationBrokerError::Rejected { status, message } => Error::bad_gateway(format!(
            "collaboration broker rejected the request ({status}): {message}"
        )),
    }
}

#[derive(Clone)]
pub struct CollaborationService<U, D, B> {
    users: Arc<U>,
    documents: Arc<D>,
    broker: Arc<B>,
}

impl<U, D, B> CollaborationService<U, D, B> {
    pub fn new(users: Arc<U>, documents: Arc<D>, broker: Arc<B>) -> Self {
        Self {
            users,
            documents,
            broker,
        }
    }
}

#[async_trait]
impl<U, D, B> CollaborationAuth for CollaborationService<U, D, B>
where
    U: UserRepository,
    D: DocumentRepository,
    B: CollaborationSessionBroker,
{
    async fn authorize(&self, user_id: &UserId, room: &InviteCode) -> Result<Value, Error> {
        let account = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;

        self.documents
            .find_by_code(room)
            .await
            .map_err(map_document_error)?
            .ok_or_else(|| Error::not_found(format!("document {room} not found")))?;

        let grant = CollaborationGrant {
            principal: PresenceProfile::from(account.user()),
            room: room.clone(),
        };
        self.broker.authorize(&grant).await.map_err(map_broker_error)
    }
}
