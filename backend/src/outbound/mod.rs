//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for local runs and tests
//! - **codes**: OS-seeded invite code generator
//! - **crypto**: argon2 password hashing
//! - **liveblocks**: collaboration token broker over HTTP
//! - **languagetool**: grammar checker over HTTP
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod codes;
pub mod crypto;
pub mod languagetool;
pub mod liveblocks;
pub mod memory;
pub mod persistence;
