//! Document registry HTTP handlers.
//!
//! ```text
//! POST   /api/v1/documents          {"owner":"ada@example.com","title":"Notes"}
//! GET    /api/v1/documents?owner=ada@example.com
//! DELETE /api/v1/documents          {"owner":"ada@example.com","code":"ab12cd34"}
//! GET    /api/v1/documents/{code}
//! ```
//!
//! The owner is named by email. A blank or absent owner is a validation
//! failure; a non-blank value that is not an email address cannot match any
//! user and is handled exactly like an unknown owner.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateDocumentRequest, DeleteDocumentRequest};
use crate::domain::{DocumentSummary, EmailAddress, Error, InviteCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DocumentSummarySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_invite_code, parse_title, require_text};

const OWNER: FieldName = FieldName::new("owner");
const TITLE: FieldName = FieldName::new("title");
const CODE: FieldName = FieldName::new("code");

/// Request body for `POST /api/v1/documents`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateDocumentBody {
    #[schema(example = "ada@example.com")]
    pub owner: Option<String>,
    #[schema(example = "Meeting notes")]
    pub title: Option<String>,
}

/// Response body carrying a fresh invite code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDocumentResponseBody {
    #[schema(example = "ab12cd34")]
    pub code: String,
}

/// Query string for `GET /api/v1/documents`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListDocumentsQuery {
    /// Email of the documents' owner.
    pub owner: Option<String>,
}

/// Response body listing an owner's documents, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListDocumentsResponseBody {
    #[schema(value_type = Vec<DocumentSummarySchema>)]
    pub documents: Vec<DocumentSummary>,
}

/// Request body for `DELETE /api/v1/documents`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DeleteDocumentBody {
    #[schema(example = "ada@example.com")]
    pub owner: Option<String>,
    #[schema(example = "ab12cd34")]
    pub code: Option<String>,
}

/// Response body acknowledging a deletion.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteDocumentResponseBody {
    pub success: bool,
}

/// Path parameters for `GET /api/v1/documents/{code}`.
#[derive(Debug, Deserialize)]
pub struct DocumentPath {
    code: String,
}

/// Validate presence of the owner, returning `None` when it can never match.
fn owner_email(raw: Option<String>) -> Result<Option<EmailAddress>, Error> {
    let raw = require_text(raw, OWNER)?;
    Ok(EmailAddress::new(&raw).ok())
}

fn owner_not_found() -> Error {
    Error::not_found("owner not found")
}

/// Create a document and return its invite code.
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body = CreateDocumentBody,
    responses(
        (status = 200, description = "Document created", body = CreateDocumentResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Owner not found", body = ErrorSchema),
        (status = 409, description = "No unused invite code available", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "createDocument",
    security([])
)]
#[post("/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    payload: web::Json<CreateDocumentBody>,
) -> ApiResult<web::Json<CreateDocumentResponseBody>> {
    let CreateDocumentBody { owner, title } = payload.into_inner();
    let owner = owner_email(owner)?;
    let title = parse_title(require_text(title, TITLE)?, TITLE)?;
    let owner = owner.ok_or_else(owner_not_found)?;

    let response = state
        .within(state.documents.create(CreateDocumentRequest { owner, title }))
        .await?;
    Ok(web::Json(CreateDocumentResponseBody {
        code: response.code.into(),
    }))
}

/// List the documents an owner created.
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    params(ListDocumentsQuery),
    responses(
        (status = 200, description = "Owner's documents", body = ListDocumentsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "listDocuments",
    security([])
)]
#[get("/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    query: web::Query<ListDocumentsQuery>,
) -> ApiResult<web::Json<ListDocumentsResponseBody>> {
    let documents = match owner_email(query.into_inner().owner)? {
        Some(owner) => state.within(state.documents_query.list(&owner)).await?,
        None => Vec::new(),
    };
    Ok(web::Json(ListDocumentsResponseBody { documents }))
}

/// Delete a document on behalf of its owner.
#[utoipa::path(
    delete,
    path = "/api/v1/documents",
    request_body = DeleteDocumentBody,
    responses(
        (status = 200, description = "Document deleted", body = DeleteDocumentResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Document belongs to another user", body = ErrorSchema),
        (status = 404, description = "Owner or document not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument",
    security([])
)]
#[delete("/documents")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteDocumentBody>,
) -> ApiResult<web::Json<DeleteDocumentResponseBody>> {
    let DeleteDocumentBody { owner, code } = payload.into_inner();
    let owner = owner_email(owner)?;
    let code = require_text(code, CODE)?;
    let owner = owner.ok_or_else(owner_not_found)?;
    let code = InviteCode::new(&code)
        .map_err(|_| Error::not_found(format!("document {} not found", code.trim())))?;

    state
        .within(state.documents.delete(DeleteDocumentRequest { owner, code }))
        .await?;
    Ok(web::Json(DeleteDocumentResponseBody { success: true }))
}

/// Resolve an invite code to the document it opens.
#[utoipa::path(
    get,
    path = "/api/v1/documents/{code}",
    params(("code" = String, Path, description = "Eight-character invite code")),
    responses(
        (status = 200, description = "Document", body = DocumentSummarySchema),
        (status = 400, description = "Malformed code", body = ErrorSchema),
        (status = 404, description = "Document not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "openDocument",
    security([])
)]
#[get("/documents/{code}")]
pub async fn open_document(
    state: web::Data<HttpState>,
    path: web::Path<DocumentPath>,
) -> ApiResult<web::Json<DocumentSummary>> {
    let code = parse_invite_code(&path.into_inner().code, CODE)?;
    let document = state.within(state.documents_query.open(&code)).await?;
    Ok(web::Json(document))
}

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;
