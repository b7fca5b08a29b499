//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use coedit::inbound::http::session_config::SessionSettings;
use coedit::inbound::http::state::DEFAULT_REQUEST_TIMEOUT;
use coedit::outbound::languagetool::LanguageToolChecker;
use coedit::outbound::liveblocks::LiveblocksBroker;
use coedit::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) grammar: Arc<LanguageToolChecker>,
    pub(crate) broker: Option<Arc<LiveblocksBroker>>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) request_timeout: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Start from the mandatory pieces; stores default to in-memory and
    /// collaboration to disabled.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        grammar: Arc<LanguageToolChecker>,
    ) -> Self {
        Self {
            session,
            bind_addr,
            grammar,
            broker: None,
            db_pool: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Back the identity store and document registry with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Enable collaboration tokens through Liveblocks.
    #[must_use]
    pub fn with_broker(mut self, broker: Arc<LiveblocksBroker>) -> Self {
        self.broker = Some(broker);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
