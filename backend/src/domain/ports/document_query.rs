//! Driving port for reading the document registry.

use async_trait::async_trait;

use crate::domain::{DocumentSummary, EmailAddress, Error, InviteCode};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentQuery: Send + Sync {
    /// Documents owned by `owner`, newest first.
    ///
    /// An owner that does not resolve yields an empty list.
    async fn list(&self, owner: &EmailAddress) -> Result<Vec<DocumentSummary>, Error>;

    /// Resolve an invite code to the document it opens.
    async fn open(&self, code: &InviteCode) -> Result<DocumentSummary, Error>;
}
