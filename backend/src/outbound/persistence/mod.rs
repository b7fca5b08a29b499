//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories here are thin: they translate between Diesel rows and domain
//! values and map database failures onto port errors. Row structs and the
//! schema stay private to this module.
//!
//! ```ignore
//! use coedit::outbound::persistence::{DbPool, DieselDocumentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coedit")).await?;
//! let documents = DieselDocumentRepository::new(pool);
//! ```

mod diesel_document_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_document_repository::DieselDocumentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
