// urlwarden-server/src/server.rs
// ============================================================================
// Module: Urlwarden HTTP Server
// Description: Route wiring and request handling for the check API.
// Purpose: Expose the inspection pipeline over HTTP with health and stats.
// Dependencies: urlwarden-core, urlwarden-config, urlwarden-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! The server exposes four routes: the check endpoint, health, stats, and
//! the dashboard. Handlers read the raw request URI rather than decoded
//! path parameters so the pipeline's evasion pre-check sees the bytes the
//! client actually sent. Metrics and audit recording happen after the
//! verdict and never change the response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use urlwarden_config::AuditSinkKind;
use urlwarden_config::StoreBackend;
use urlwarden_config::UrlwardenConfig;
use urlwarden_core::Classification;
use urlwarden_core::InMemoryReputationStore;
use urlwarden_core::InMemorySignatureStore;
use urlwarden_core::InspectError;
use urlwarden_core::RawRequest;
use urlwarden_core::SecurityMetrics;
use urlwarden_core::SharedReputationStore;
use urlwarden_core::SharedSignatureStore;
use urlwarden_core::UrlInspector;
use urlwarden_store_sqlite::SqliteReputationStore;
use urlwarden_store_sqlite::SqliteSignatureStore;
use urlwarden_store_sqlite::SqliteStoreConfig;
use urlwarden_store_sqlite::default_reputation;
use urlwarden_store_sqlite::default_signatures;

use crate::audit::AuditSink;
use crate::audit::CheckAuditEvent;
use crate::audit::FileAuditSink;
use crate::audit::ServerAuditEvent;
use crate::audit::StderrAuditSink;
use crate::dashboard::DASHBOARD_HTML;
use crate::response::HealthBody;
use crate::response::malformed_request_body;
use crate::response::processing_error_body;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Route prefix preceding the path-embedded target URL.
const URLINFO_PREFIX: &str = "/urlinfo/1/";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server construction and serving errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration was invalid for serving.
    #[error("server config error: {0}")]
    Config(String),
    /// A component failed to initialize.
    #[error("server init error: {0}")]
    Init(String),
    /// The transport failed to bind or serve.
    #[error("server transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Store Wiring
// ============================================================================

/// Builds the configured reference stores, seeding them when requested.
///
/// # Errors
///
/// Returns [`ServerError`] when the SQLite backend is selected without a
/// path or cannot be opened or seeded.
pub fn build_stores(
    config: &UrlwardenConfig,
) -> Result<(SharedSignatureStore, SharedReputationStore), ServerError> {
    match config.stores.backend {
        StoreBackend::Memory => {
            let (signatures, reputation) = if config.stores.seed_defaults {
                (
                    InMemorySignatureStore::with_records(default_signatures()),
                    InMemoryReputationStore::with_records(default_reputation()),
                )
            } else {
                (InMemorySignatureStore::new(), InMemoryReputationStore::new())
            };
            Ok((
                SharedSignatureStore::from_store(signatures),
                SharedReputationStore::from_store(reputation),
            ))
        }
        StoreBackend::Sqlite => {
            let path = config.stores.path.clone().ok_or_else(|| {
                ServerError::Config("sqlite backend requires stores.path".to_string())
            })?;
            let store_config = SqliteStoreConfig {
                path,
                busy_timeout_ms: config.stores.busy_timeout_ms,
            };
            let signatures = SqliteSignatureStore::open(&store_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            let reputation = SqliteReputationStore::open(&store_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            if config.stores.seed_defaults {
                signatures.seed_defaults().map_err(|err| ServerError::Init(err.to_string()))?;
                reputation.seed_defaults().map_err(|err| ServerError::Init(err.to_string()))?;
            }
            Ok((
                SharedSignatureStore::from_store(signatures),
                SharedReputationStore::from_store(reputation),
            ))
        }
    }
}

/// Builds the configured audit sink.
fn build_audit_sink(config: &UrlwardenConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    match config.audit.sink {
        AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditSinkKind::File => {
            let path = config.audit.path.as_ref().ok_or_else(|| {
                ServerError::Config("file audit sink requires audit.path".to_string())
            })?;
            let sink =
                FileAuditSink::new(path).map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(Arc::new(sink))
        }
    }
}

// ============================================================================
// SECTION: App State
// ============================================================================

/// Shared state for all HTTP handlers.
pub(crate) struct AppState {
    /// Inspection engine over the configured stores.
    pub(crate) inspector: UrlInspector<SharedSignatureStore, SharedReputationStore>,
    /// Process-wide metrics recorder.
    pub(crate) metrics: SecurityMetrics,
    /// Configured audit sink.
    pub(crate) audit: Arc<dyn AuditSink>,
    /// Process start in unix-epoch seconds.
    pub(crate) started_at: i64,
    /// Process start as an RFC 3339 string.
    pub(crate) start_time: String,
}

// ============================================================================
// SECTION: App Server
// ============================================================================

/// HTTP server wrapping the inspection pipeline.
pub struct AppServer {
    /// Bind address from configuration.
    bind: SocketAddr,
    /// Shared handler state.
    state: Arc<AppState>,
}

impl AppServer {
    /// Builds a server from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid or a store
    /// or audit sink fails to initialize.
    pub fn from_config(config: &UrlwardenConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let bind: SocketAddr = config
            .server
            .bind
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let (signatures, reputation) = build_stores(config)?;
        let audit = build_audit_sink(config)?;
        let inspector = UrlInspector::new(signatures, reputation, config.pipeline_config());
        let started_at = unix_seconds();
        let state = Arc::new(AppState {
            inspector,
            metrics: SecurityMetrics::new(),
            audit,
            started_at,
            start_time: rfc3339(started_at),
        });
        Ok(Self {
            bind,
            state,
        })
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Builds the route tree over the shared state.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until the transport fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = tokio::net::TcpListener::bind(self.bind)
            .await
            .map_err(|_| ServerError::Transport("bind failed".to_string()))?;
        self.state.audit.record_server(&ServerAuditEvent::started(&self.bind.to_string()));
        let router = self.router();
        axum::serve(listener, router)
            .await
            .map_err(|_| ServerError::Transport("server failed".to_string()))
    }
}

/// Builds the route tree.
fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/urlinfo/1/{*url_parts}", get(handle_urlinfo))
        .route("/health", get(handle_health))
        .route("/stats", get(handle_stats))
        .route("/dashboard", get(handle_dashboard))
        .with_state(state)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles check requests on the raw, undecoded request URI.
async fn handle_urlinfo(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let started = Instant::now();
    let fragment = uri.path().strip_prefix(URLINFO_PREFIX).unwrap_or_default().to_string();
    let request = RawRequest {
        path_fragment: fragment,
        query_string: uri.query().map(ToString::to_string),
    };

    match state.inspector.check(&request) {
        Ok(report) => {
            let now = unix_seconds();
            let classification = Classification::from_report(&report);
            // Metrics loss is observability-only; the verdict still returns.
            let _ = state.metrics.record(report.url.clone(), classification, now);
            state
                .audit
                .record_check(&CheckAuditEvent::verdict(&report, elapsed_millis(&started)));
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(InspectError::MalformedRequest(_)) => {
            state.audit.record_check(&CheckAuditEvent::malformed(
                &request.path_fragment,
                elapsed_millis(&started),
            ));
            (StatusCode::BAD_REQUEST, axum::Json(malformed_request_body())).into_response()
        }
        Err(InspectError::Store(err)) => {
            state.audit.record_check(&CheckAuditEvent::store_error(
                &request.path_fragment,
                err.to_string(),
                elapsed_millis(&started),
            ));
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(processing_error_body()))
                .into_response()
        }
    }
}

/// Handles liveness checks.
async fn handle_health(State(state): State<Arc<AppState>>) -> Response {
    let body = HealthBody {
        status: "healthy",
        uptime_seconds: unix_seconds().saturating_sub(state.started_at),
        start_time: state.start_time.clone(),
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

/// Handles metrics snapshot reads.
async fn handle_stats(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.snapshot(unix_seconds()) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(processing_error_body()))
                .into_response()
        }
    }
}

/// Handles dashboard page requests.
async fn handle_dashboard() -> Response {
    Html(DASHBOARD_HTML).into_response()
}

// ============================================================================
// SECTION: Time Helpers
// ============================================================================

/// Returns seconds since the unix epoch.
fn unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}

/// Returns elapsed whole milliseconds since `started`.
fn elapsed_millis(started: &Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Formats a unix-epoch second as RFC 3339, falling back to the raw value.
fn rfc3339(unix: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|datetime| datetime.format(&Rfc3339).ok())
        .unwrap_or_else(|| unix.to_string())
}
