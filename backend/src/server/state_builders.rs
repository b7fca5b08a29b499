//! Builders wiring adapters into the services behind each driving port.

use std::sync::Arc;

use mockable::DefaultClock;

use coedit::domain::ports::{
    CollaborationAuth, DisabledCollaborationBroker, DocumentRepository, UserRepository,
};
use coedit::domain::{AccountService, CollaborationService, DocumentRegistry, GrammarService};
use coedit::inbound::http::state::{HttpState, HttpStatePorts};
use coedit::outbound::codes::RandomInviteCodeGenerator;
use coedit::outbound::crypto::Argon2PasswordHasher;
use coedit::outbound::memory::{InMemoryDocumentRepository, InMemoryUserRepository};
use coedit::outbound::persistence::{DieselDocumentRepository, DieselUserRepository};

use super::ServerConfig;

/// Build HTTP state, using PostgreSQL when a pool is configured and
/// process-local stores otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            config,
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselDocumentRepository::new(pool.clone())),
        ),
        None => build_ports(
            config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryDocumentRepository::new()),
        ),
    };
    HttpState::new(ports).with_request_timeout(config.request_timeout)
}

fn build_ports<U, D>(config: &ServerConfig, users: Arc<U>, documents: Arc<D>) -> HttpStatePorts
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
{
    let registry = Arc::new(DocumentRegistry::new(
        users.clone(),
        documents.clone(),
        Arc::new(RandomInviteCodeGenerator),
        Arc::new(DefaultClock),
    ));
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher),
    ));
    let collaboration: Arc<dyn CollaborationAuth> = match &config.broker {
        Some(broker) => Arc::new(CollaborationService::new(users, documents, broker.clone())),
        None => Arc::new(CollaborationService::new(
            users,
            documents,
            Arc::new(DisabledCollaborationBroker),
        )),
    };

    HttpStatePorts {
        documents: registry.clone(),
        documents_query: registry,
        registration: accounts.clone(),
        login: accounts.clone(),
        directory: accounts,
        collaboration,
        grammar: Arc::new(GrammarService::new(config.grammar.clone())),
    }
}
