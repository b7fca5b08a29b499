//! In-memory adapters for the identity store and the document registry.
//!
//! Used when no database URL is configured and by integration tests. A single
//! mutex per store makes `insert` and `delete_owned` atomic in the same way
//! the database constraints do.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    DocumentPersistenceError, DocumentRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Document, EmailAddress, InviteCode, UserAccount, UserId};

fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    poisoned: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex.lock().map_err(|_| poisoned("in-memory store lock poisoned"))
}

/// Identity store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<EmailAddress, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = lock(&self.accounts, UserPersistenceError::query)?;
        let email = account.user().email();
        if accounts.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        accounts.insert(email.clone(), account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = lock(&self.accounts, UserPersistenceError::query)?;
        Ok(accounts.get(email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = lock(&self.accounts, UserPersistenceError::query)?;
        Ok(accounts
            .values()
            .find(|account| account.user().id() == id)
            .cloned())
    }

    async fn search_emails(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<EmailAddress>, UserPersistenceError> {
        let accounts = lock(&self.accounts, UserPersistenceError::query)?;
        let mut found: Vec<EmailAddress> = accounts
            .keys()
            .filter(|email| email.as_ref().contains(fragment))
            .cloned()
            .collect();
        found.sort();
        found.truncate(limit);
        Ok(found)
    }

    async fn find_many_by_email(
        &self,
        emails: &[EmailAddress],
    ) -> Result<Vec<UserAccount>, UserPersistenceError> {
        let accounts = lock(&self.accounts, UserPersistenceError::query)?;
        Ok(emails
            .iter()
            .filter_map(|email| accounts.get(email).cloned())
            .collect())
    }
}

/// Document store held in process memory, keyed by invite code.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<HashMap<InviteCode, Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, document: &Document) -> Result<(), DocumentPersistenceError> {
        let mut documents = lock(&self.documents, DocumentPersistenceError::query)?;
        if documents.contains_key(document.code()) {
            return Err(DocumentPersistenceError::duplicate_code(
                document.code().as_ref(),
            ));
        }
        documents.insert(document.code().clone(), document.clone());
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Document>, DocumentPersistenceError> {
        let documents = lock(&self.documents, DocumentPersistenceError::query)?;
        Ok(documents
            .values()
            .filter(|document| document.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn find_by_code(
        &self,
        code: &InviteCode,
    ) -> Result<Option<Document>, DocumentPersistenceError> {
        let documents = lock(&self.documents, DocumentPersistenceError::query)?;
        Ok(documents.get(code).cloned())
    }

    async fn delete_owned(
        &self,
        code: &InviteCode,
        owner_id: &UserId,
    ) -> Result<bool, DocumentPersistenceError> {
        let mut documents = lock(&self.documents, DocumentPersistenceError::query)?;
        let owned = documents
            .get(code)
            .is_some_and(|document| document.is_owned_by(owner_id));
        if owned {
            documents.remove(code);
        }
        Ok(owned)
    }
}
