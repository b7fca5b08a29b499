//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns that sit in front of every
//! handler: currently request tracing.

pub mod trace;

pub use trace::Trace;
