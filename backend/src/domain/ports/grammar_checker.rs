//! Port for the external grammar-check service.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::GrammarCheck;

use super::define_port_error;

define_port_error! {
    /// Errors raised by grammar checker adapters.
    pub enum GrammarCheckerError {
        /// The service could not be reached or timed out.
        Transport { message: String } => "grammar service unreachable: {message}",
        /// The service answered with a non-success status.
        Status { status: u16 } => "grammar service returned status {status}",
        /// The response body was not JSON.
        Decode { message: String } => "grammar service response was not JSON: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Submit text and return the service's match list verbatim.
    async fn check(&self, request: &GrammarCheck) -> Result<Value, GrammarCheckerError>;
}
