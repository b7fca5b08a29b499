//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::Error;
use crate::domain::ports::{
    CollaborationAuth, DocumentCommand, DocumentQuery, GrammarProxy, LoginService,
    RegistrationService, UserDirectory,
};

/// Deadline applied to each port call unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub documents: Arc<dyn DocumentCommand>,
    pub documents_query: Arc<dyn DocumentQuery>,
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub directory: Arc<dyn UserDirectory>,
    pub collaboration: Arc<dyn CollaborationAuth>,
    pub grammar: Arc<dyn GrammarProxy>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub documents: Arc<dyn DocumentCommand>,
    pub documents_query: Arc<dyn DocumentQuery>,
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub directory: Arc<dyn UserDirectory>,
    pub collaboration: Arc<dyn CollaborationAuth>,
    pub grammar: Arc<dyn GrammarProxy>,
    request_timeout: Duration,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default request deadline.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            documents,
            documents_query,
            registration,
            login,
            directory,
            collaboration,
            grammar,
        } = ports;
        Self {
            documents,
            documents_query,
            registration,
            login,
            directory,
            collaboration,
            grammar,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replace the per-call deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Run a port call under the request deadline.
    ///
    /// Expiry is reported as `service_unavailable`; the inner future is
    /// dropped, which cancels any I/O it still had in flight.
    pub async fn within<T, F>(&self, call: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| Error::service_unavailable("request deadline exceeded"))?
    }
}
