//! PostgreSQL-backed `DocumentRepository` using Diesel.
//!
//! Uniqueness of invite codes rests on the `documents_code_key` constraint;
//! owner-scoped deletion is a single `DELETE ... WHERE code AND owner_id`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DocumentPersistenceError, DocumentRepository};
use crate::domain::{Document, DocumentId, DocumentTitle, InviteCode, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{DocumentRow, NewDocumentRow};
use super::pool::DbPool;
use super::schema::documents;

#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(message: String) -> DocumentPersistenceError {
    DocumentPersistenceError::connection(message)
}

fn diesel_error(error: diesel::result::Error) -> DocumentPersistenceError {
    map_diesel_error(
        error,
        DocumentPersistenceError::query,
        DocumentPersistenceError::connection,
    )
}

fn row_to_document(row: DocumentRow) -> Result<Document, DocumentPersistenceError> {
    let invalid = |err: crate::domain::DocumentValidationError| {
        DocumentPersistenceError::query(format!("stored document is invalid: {err}"))
    };
    Ok(Document::new(
        DocumentId::from_uuid(row.id),
        InviteCode::new(&row.code).map_err(invalid)?,
        DocumentTitle::new(row.title).map_err(invalid)?,
        UserId::from_uuid(row.owner_id),
        row.created_at,
    ))
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn insert(&self, document: &Document) -> Result<(), DocumentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let row = NewDocumentRow {
            id: *document.id().as_uuid(),
            code: document.code().as_ref(),
            title: document.title().as_ref(),
            owner_id: *document.owner_id().as_uuid(),
            created_at: document.created_at(),
        };

        match diesel::insert_into(documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(DocumentPersistenceError::duplicate_code(
                document.code().as_ref(),
            )),
            Err(err) => Err(diesel_error(err)),
        }
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Document>, DocumentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::owner_id.eq(owner_id.as_uuid()))
            .order((documents::created_at.desc(), documents::code.asc()))
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_document).collect()
    }

    async fn find_by_code(
        &self,
        code: &InviteCode,
    ) -> Result<Option<Document>, DocumentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let row = documents::table
            .filter(documents::code.eq(code.as_ref()))
            .select(DocumentRow::as_select())
            .first::<DocumentRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_document).transpose()
    }

    async fn delete_owned(
        &self,
        code: &InviteCode,
        owner_id: &UserId,
    ) -> Result<bool, DocumentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let removed = diesel::delete(
            documents::table.filter(
                documents::code
                    .eq(code.as_ref())
                    .and(documents::owner_id.eq(owner_id.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
