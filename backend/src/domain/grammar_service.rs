//! Grammar-check relay service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{GrammarChecker, GrammarCheckerError, GrammarProxy};
use crate::domain::{Error, GrammarCheck};

fn map_checker_error(error: GrammarCheckerError) -> Error {
    Error::bad_gateway(format!("grammar check failed: {error}"))
}

#[derive(Clone)]
pub struct GrammarService<C> {
    checker: Arc<C>,
}

impl<C> GrammarService<C> {
    pub fn new(checker: Arc<C>) -> Self {
        Self { checker }
    }
}

#[async_trait]
impl<C> GrammarProxy for GrammarService<C>
where
    C: GrammarChecker,
{
    async fn check(&self, request: &GrammarCheck) -> Result<Value, Error> {
        self.checker.check(request).await.map_err(map_checker_error)
    }
}
