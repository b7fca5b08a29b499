//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod collaboration_auth;
mod collaboration_broker;
mod document_command;
mod document_query;
mod document_repository;
mod grammar_checker;
mod grammar_proxy;
mod invite_code_generator;
mod login_service;
mod password_hasher;
mod registration_service;
mod user_directory;
mod user_repository;

#[cfg(test)]
pub use collaboration_auth::MockCollaborationAuth;
pub use collaboration_auth::CollaborationAuth;
#[cfg(test)]
pub use collaboration_broker::MockCollaborationSessionBroker;
pub use collaboration_broker::{
    CollaborationBrokerError, CollaborationGrant, CollaborationSessionBroker,
    DisabledCollaborationBroker,
};
#[cfg(test)]
pub use document_command::MockDocumentCommand;
pub use document_command::{
    CreateDocumentRequest, CreateDocumentResponse, DeleteDocumentRequest, DocumentCommand,
};
#[cfg(test)]
pub use document_query::MockDocumentQuery;
pub use document_query::DocumentQuery;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{DocumentPersistenceError, DocumentRepository};
#[cfg(test)]
pub use grammar_checker::MockGrammarChecker;
pub use grammar_checker::{GrammarChecker, GrammarCheckerError};
#[cfg(test)]
pub use grammar_proxy::MockGrammarProxy;
pub use grammar_proxy::GrammarProxy;
#[cfg(test)]
pub use invite_code_generator::MockInviteCodeGenerator;
pub use invite_code_generator::{InviteCodeGenerator, ScriptedInviteCodeGenerator};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{USER_SEARCH_LIMIT, UserDirectory};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
