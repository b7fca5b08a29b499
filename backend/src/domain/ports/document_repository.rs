//! Port for document persistence.
//!
//! Adapters must back `insert` with a unique constraint on the invite code and
//! implement `delete_owned` as a single conditional delete so two racing
//! deletes cannot both succeed.

use async_trait::async_trait;

use crate::domain::{Document, InviteCode, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document repository adapters.
    pub enum DocumentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "document repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "document repository query failed: {message}",
        /// The unique invite code constraint rejected an insert.
        DuplicateCode { code: String } => "invite code {code} is already in use",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new document. Never overwrites an existing code.
    async fn insert(&self, document: &Document) -> Result<(), DocumentPersistenceError>;

    /// All documents owned by `owner_id`, in any order.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Document>, DocumentPersistenceError>;

    /// Look a document up by invite code.
    async fn find_by_code(
        &self,
        code: &InviteCode,
    ) -> Result<Option<Document>, DocumentPersistenceError>;

    /// Delete the document with `code` only if `owner_id` owns it.
    ///
    /// Returns `true` when a row was removed.
    async fn delete_owned(
        &self,
        code: &InviteCode,
        owner_id: &UserId,
    ) -> Result<bool, DocumentPersistenceError>;
}
