use std::sync::Arc;

use reelhouse_notify::{EmailDelivery, EventBus};
use reelhouse_payments::checkout::ProviderMap;

use crate::config::ServerConfig;
use crate::storage::ObjectStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reelhouse_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<EventBus>,
    /// Email delivery, present only when SMTP is configured.
    pub mailer: Option<Arc<EmailDelivery>>,
    /// Uploaded-media storage backend.
    pub object_store: Arc<dyn ObjectStore>,
    /// Payment providers keyed by method, shared across checkouts.
    pub providers: Arc<ProviderMap>,
}
