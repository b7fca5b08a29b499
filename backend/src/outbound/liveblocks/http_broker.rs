//! Reqwest-backed Liveblocks broker.
//!
//! Owns transport details only: bearer authentication, request timeout,
//! status mapping and JSON decoding of the token response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use zeroize::Zeroizing;

use super::dto::AuthorizeUserBody;
use crate::domain::ports::{
    CollaborationBrokerError, CollaborationGrant, CollaborationSessionBroker,
};

const AUTHORIZE_USER_PATH: &str = "v2/authorize-user";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Failures while constructing the broker.
#[derive(Debug, thiserror::Error)]
pub enum BrokerSetupError {
    #[error("invalid Liveblocks API base URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Broker that asks Liveblocks for room-scoped user tokens.
pub struct LiveblocksBroker {
    client: Client,
    endpoint: Url,
    secret_key: Zeroizing<String>,
}

impl LiveblocksBroker {
    /// Build a broker for the API rooted at `api_base`.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint URL cannot be derived or the client cannot be
    /// built.
    pub fn new(
        api_base: &Url,
        secret_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, BrokerSetupError> {
        let endpoint = api_base.join(AUTHORIZE_USER_PATH)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            secret_key,
        })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CollaborationSessionBroker for LiveblocksBroker {
    async fn authorize(&self, grant: &CollaborationGrant) -> Result<Value, CollaborationBrokerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.secret_key.as_str())
            .json(&AuthorizeUserBody::from(grant))
            .send()
            .await
            .map_err(|err| CollaborationBrokerError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| CollaborationBrokerError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref()).map_err(|err| {
            CollaborationBrokerError::rejected(status.as_u16(), format!("invalid JSON: {err}"))
        })
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CollaborationBrokerError {
    let preview: String = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect();
    let message = if preview.is_empty() {
        status.canonical_reason().unwrap_or("no body").to_owned()
    } else {
        preview
    };
    CollaborationBrokerError::rejected(status.as_u16(), message)
}
