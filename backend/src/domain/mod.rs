//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for users and documents, the
//! services that enforce the invite-code workflow, and the ports through
//! which adapters plug in. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, EmailAddress, DisplayName, UserId: identity values.
//! - Document, InviteCode, DocumentTitle, DocumentSummary: registry values.
//! - DocumentRegistry, AccountService, CollaborationService, GrammarService:
//!   driving port implementations.

pub mod account_service;
pub mod auth;
pub mod collaboration_service;
pub mod document;
pub mod document_registry;
pub mod error;
pub mod grammar;
pub mod grammar_service;
pub mod ports;
pub mod presence;
pub mod trace_id;
pub mod user;

pub(crate) use self::account_service::map_user_persistence_error;
pub use self::account_service::AccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::collaboration_service::CollaborationService;
pub use self::document::{
    DOCUMENT_TITLE_MAX, Document, DocumentId, DocumentSummary, DocumentTitle,
    DocumentValidationError, INVITE_CODE_ALPHABET, INVITE_CODE_LEN, InviteCode,
    sort_newest_first,
};
pub use self::document_registry::{DocumentRegistry, MAX_CODE_ATTEMPTS};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::grammar::{DEFAULT_LANGUAGE, GrammarCheck, GrammarValidationError};
pub use self::grammar_service::GrammarService;
pub use self::presence::{DEFAULT_AVATAR_URL, PresenceInfo, PresenceProfile, color_from_email};
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, EmailAddress, User, UserAccount, UserId,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use coedit::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
