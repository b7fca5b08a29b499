//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape and register under the domain
//! type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "bad_gateway")]
    BadGateway,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "document ab12cd34 not found")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "6f0c1c1e-6c3a-4f7e-9c53-0f1a2b3c4d5e")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::DocumentSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DocumentSummary)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentSummarySchema {
    /// Eight-character invite code.
    #[schema(example = "ab12cd34", pattern = "^[a-z0-9]{8}$")]
    code: String,
    #[schema(example = "Meeting notes")]
    title: String,
    /// RFC 3339 creation timestamp.
    #[schema(example = "2026-01-05T12:00:00Z")]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::PresenceInfo`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PresenceInfo)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PresenceInfoSchema {
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "#1a2b3c")]
    color: String,
    #[schema(example = "https://liveblocks.io/avatars/avatar-1.png")]
    avatar: String,
}

/// OpenAPI schema for [`crate::domain::PresenceProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PresenceProfile)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PresenceProfileSchema {
    /// Collaborator email.
    #[schema(example = "ada@example.com")]
    id: String,
    info: PresenceInfoSchema,
}
