//! Driving port for document mutations: create and owner-scoped delete.

use async_trait::async_trait;

use crate::domain::{DocumentTitle, EmailAddress, Error, InviteCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub owner: EmailAddress,
    pub title: DocumentTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentResponse {
    pub code: InviteCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDocumentRequest {
    pub owner: EmailAddress,
    pub code: InviteCode,
}

/// Domain use-case port for changing the document registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCommand: Send + Sync {
    /// Create a document for `owner` and return its fresh invite code.
    ///
    /// Fails with `not_found` for an unknown owner and `conflict` when no
    /// unused code could be found.
    async fn create(&self, request: CreateDocumentRequest) -> Result<CreateDocumentResponse, Error>;

    /// Permanently delete a document its owner no longer wants.
    ///
    /// Fails with `not_found` for an unknown owner or code and `forbidden`
    /// when the document belongs to someone else.
    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), Error>;
}
