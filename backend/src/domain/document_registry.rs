//! Document registry service.
//!
//! Owns the invite-code workflow: creating documents under a fresh code,
//! listing an owner's documents, opening a document by code and deleting it on
//! behalf of its owner. Ownership is always checked against the resolved
//! [`UserId`], never against email strings.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CreateDocumentRequest, CreateDocumentResponse, DeleteDocumentRequest, DocumentCommand,
    DocumentPersistenceError, DocumentQuery, DocumentRepository, InviteCodeGenerator,
    UserRepository,
};
use crate::domain::{
    Document, DocumentId, DocumentSummary, EmailAddress, Error, InviteCode, UserAccount,
    map_user_persistence_error, sort_newest_first,
};

/// Attempts made to find an unused invite code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 3;

pub(crate) fn map_document_error(error: DocumentPersistenceError) -> Error {
    match error {
        DocumentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("document repository unavailable: {message}"))
        }
        DocumentPersistenceError::Query { message } => {
            Error::internal(format!("document repository error: {message}"))
        }
        DocumentPersistenceError::DuplicateCode { code } => {
            Error::conflict(format!("invite code {code} is already in use"))
        }
    }
}

/// Registry service implementing [`DocumentCommand`] and [`DocumentQuery`].
#[derive(Clone)]
pub struct DocumentRegistry<U, D, G> {
    users: Arc<U>,
    documents: Arc<D>,
    codes: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<U, D, G> DocumentRegistry<U, D, G> {
    /// Wire the registry to its identity store, document store, code source
    /// and clock.
    pub fn new(users: Arc<U>, documents: Arc<D>, codes: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            documents,
            codes,
            clock,
        }
    }
}

impl<U, D, G> DocumentRegistry<U, D, G>
where
    U: UserRepository,
{
    async fn resolve_owner(&self, owner: &EmailAddress) -> Result<Option<UserAccount>, Error> {
        self.users
            .find_by_email(owner)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn require_owner(&self, owner: &EmailAddress) -> Result<UserAccount, Error> {
        self.resolve_owner(owner)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {owner} not found")))
    }
}

#[async_trait]
impl<U, D, G> DocumentCommand for DocumentRegistry<U, D, G>
where
    U: UserRepository,
    D: DocumentRepository,
    G: InviteCodeGenerator,
{
    async fn create(&self, request: CreateDocumentRequest) -> Result<CreateDocumentResponse, Error> {
        let owner = self.require_owner(&request.owner).await?;
        let owner_id = owner.user().id();

        for _ in 0..MAX_CODE_ATTEMPTS {
            let document = Document::new(
                DocumentId::random(),
                self.codes.next_code(),
                request.title.clone(),
                owner_id.clone(),
                self.clock.utc(),
            );
            match self.documents.insert(&document).await {
                Ok(()) => {
                    return Ok(CreateDocumentResponse {
                        code: document.code().clone(),
                    });
                }
                Err(DocumentPersistenceError::DuplicateCode { .. }) => {}
                Err(other) => return Err(map_document_error(other)),
            }
        }

        Err(Error::conflict(format!(
            "no unused invite code found after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }

    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), Error> {
        let owner = self.require_owner(&request.owner).await?;
        let owner_id = owner.user().id();

        let document = self
            .documents
            .find_by_code(&request.code)
            .await
            .map_err(map_document_error)?
            .ok_or_else(|| Error::not_found(format!("document {} not found", request.code)))?;

        if !document.is_owned_by(owner_id) {
            return Err(Error::forbidden(format!(
                "document {} belongs to another user",
                request.code
            )));
        }

        let removed = self
            .documents
            .delete_owned(&request.code, owner_id)
            .await
            .map_err(map_document_error)?;
        if removed {
            Ok(())
        } else {
            // Lost a race with a concurrent delete.
            Err(Error::not_found(format!(
                "document {} not found",
                request.code
            )))
        }
    }
}

#[async_trait]
impl<U, D, G> DocumentQuery for DocumentRegistry<U, D, G>
where
    U: UserRepository,
    D: DocumentRepository,
    G: InviteCodeGenerator,
{
    async fn list(&self, owner: &EmailAddress) -> Result<Vec<DocumentSummary>, Error> {
        let Some(account) = self.resolve_owner(owner).await? else {
            return Ok(Vec::new());
        };

        let documents = self
            .documents
            .list_by_owner(account.user().id())
            .await
            .map_err(map_document_error)?;
        let mut summaries: Vec<DocumentSummary> =
            documents.iter().map(Document::summary).collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    async fn open(&self, code: &InviteCode) -> Result<DocumentSummary, Error> {
        self.documents
            .find_by_code(code)
            .await
            .map_err(map_document_error)?
            .map(|document| document.summary())
            .ok_or_else(|| Error::not_found(format!("document {code} not found")))
    }
}

#[cfg(test)]
#[path = "document_registry_tests.rs"]
mod tests;
