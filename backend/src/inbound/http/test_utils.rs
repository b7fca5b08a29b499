//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    MockCollaborationAuth, MockDocumentCommand, MockDocumentQuery, MockGrammarProxy,
    MockLoginService, MockRegistrationService, MockUserDirectory,
};
use crate::inbound::http::state::HttpStatePorts;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports whose mocks carry no expectations; any call fails the test.
pub fn unused_ports() -> HttpStatePorts {
    HttpStatePorts {
        documents: Arc::new(MockDocumentCommand::new()),
        documents_query: Arc::new(MockDocumentQuery::new()),
        registration: Arc::new(MockRegistrationService::new()),
        login: Arc::new(MockLoginService::new()),
        directory: Arc::new(MockUserDirectory::new()),
        collaboration: Arc::new(MockCollaborationAuth::new()),
        grammar: Arc::new(MockGrammarProxy::new()),
    }
}
