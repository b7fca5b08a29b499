//! Coedit backend: a document registry with shareable invite codes, user
//! accounts, a realtime collaboration handshake and a grammar-check proxy.
//!
//! The crate is laid out hexagonally. [`domain`] holds values, services and
//! ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`] holds
//! the PostgreSQL, in-memory, Liveblocks and LanguageTool adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
