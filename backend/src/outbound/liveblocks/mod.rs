//! Liveblocks outbound adapter.
//!
//! Implements the `CollaborationSessionBroker` port against the Liveblocks
//! REST API (`POST /v2/authorize-user`).

mod dto;
mod http_broker;

pub use http_broker::{BrokerSetupError, LiveblocksBroker};
