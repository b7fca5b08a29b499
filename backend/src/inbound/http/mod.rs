//! HTTP inbound adapter exposing REST endpoints.

pub mod collaboration;
pub mod documents;
pub mod error;
pub mod grammar;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
