//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the session cookie
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for tooling.

use crate::inbound::http::collaboration::CollaborationAuthBody;
use crate::inbound::http::documents::{
    CreateDocumentBody, CreateDocumentResponseBody, DeleteDocumentBody,
    DeleteDocumentResponseBody, ListDocumentsResponseBody,
};
use crate::inbound::http::grammar::GrammarCheckBody;
use crate::inbound::http::schemas::{
    DocumentSummarySchema, ErrorCodeSchema, ErrorSchema, PresenceInfoSchema,
    PresenceProfileSchema, UserSchema,
};
use crate::inbound::http::users::{AccountResponseBody, LoginBody, RegisterBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Coedit backend API",
        description = "Document registry, accounts, collaboration handshake and grammar checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::documents::open_document,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::user_presence,
        crate::inbound::http::collaboration::authorize_collaboration,
        crate::inbound::http::grammar::check_grammar,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        DocumentSummarySchema,
        PresenceInfoSchema,
        PresenceProfileSchema,
        CreateDocumentBody,
        CreateDocumentResponseBody,
        ListDocumentsResponseBody,
        DeleteDocumentBody,
        DeleteDocumentResponseBody,
        RegisterBody,
        LoginBody,
        AccountResponseBody,
        CollaborationAuthBody,
        GrammarCheckBody,
    )),
    tags(
        (name = "documents", description = "Create, list, delete and open documents"),
        (name = "users", description = "Accounts, sessions and the user directory"),
        (name = "collaboration", description = "Realtime collaboration handshake"),
        (name = "language", description = "Grammar checking"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
