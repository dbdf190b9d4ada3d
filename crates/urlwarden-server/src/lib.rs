// urlwarden-server/src/lib.rs
// ============================================================================
// Module: Urlwarden Server Library
// Description: Public API surface for the HTTP transport layer.
// Purpose: Expose the app server, store wiring, and audit sinks.
// Dependencies: crate::{audit, dashboard, response, server}
// ============================================================================

//! ## Overview
//! The server crate adapts the inspection pipeline to HTTP: it wires
//! configured stores into a [`server::AppServer`], exposes the check,
//! health, stats, and dashboard routes, and emits one structured audit
//! event per completed request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod dashboard;
pub mod response;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::CheckAuditEvent;
pub use audit::FileAuditSink;
pub use audit::ServerAuditEvent;
pub use audit::StderrAuditSink;
pub use server::AppServer;
pub use server::ServerError;
pub use server::build_stores;
