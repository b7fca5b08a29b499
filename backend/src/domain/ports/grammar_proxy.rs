//! Driving port for grammar checking.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, GrammarCheck};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrammarProxy: Send + Sync {
    /// Relay `request` to the grammar service and return its answer verbatim.
    async fn check(&self, request: &GrammarCheck) -> Result<Value, Error>;
}
