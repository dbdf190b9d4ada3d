// urlwarden-server/src/audit.rs
// ============================================================================
// Module: Urlwarden Audit Logging
// Description: Structured audit events for request handling.
// Purpose: Emit JSON-line audit logs without hard dependencies.
// Dependencies: urlwarden-core, serde
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for request logging.
//! It is intentionally lightweight so deployments can route events to their
//! preferred logging pipeline without redesign. A `processing_error`
//! response carries its diagnostic detail only here, never in the HTTP
//! body, so internal failures cannot read as security verdicts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use urlwarden_core::CheckReport;
use urlwarden_core::Decision;
use urlwarden_core::ThreatCategory;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event emitted for every completed check request.
#[derive(Debug, Clone, Serialize)]
pub struct CheckAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// URL the event refers to (sanitized for verdicts, raw fragment otherwise).
    pub url: String,
    /// Request outcome class.
    pub outcome: &'static str,
    /// Decision, present for verdict outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    /// Threat category, present when a threat was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<ThreatCategory>,
    /// Deny reason, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Internal diagnostic detail, never returned to callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request handling duration in milliseconds.
    pub duration_ms: u64,
}

impl CheckAuditEvent {
    /// Builds the event for a produced verdict.
    #[must_use]
    pub fn verdict(report: &CheckReport, duration_ms: u64) -> Self {
        Self {
            event: "url_check",
            timestamp_ms: now_millis(),
            url: report.url.clone(),
            outcome: "verdict",
            decision: Some(report.decision),
            threat_type: report.threat_detected.as_ref().map(|threat| threat.threat_type),
            reason: report.reason.clone(),
            detail: None,
            duration_ms,
        }
    }

    /// Builds the event for a malformed request.
    #[must_use]
    pub fn malformed(fragment: &str, duration_ms: u64) -> Self {
        Self {
            event: "url_check",
            timestamp_ms: now_millis(),
            url: fragment.to_string(),
            outcome: "malformed_request",
            decision: None,
            threat_type: None,
            reason: None,
            detail: None,
            duration_ms,
        }
    }

    /// Builds the event for a store failure.
    #[must_use]
    pub fn store_error(fragment: &str, detail: String, duration_ms: u64) -> Self {
        Self {
            event: "url_check",
            timestamp_ms: now_millis(),
            url: fragment.to_string(),
            outcome: "store_error",
            decision: None,
            threat_type: None,
            reason: None,
            detail: Some(detail),
            duration_ms,
        }
    }
}

/// Audit event emitted on server lifecycle transitions.
#[derive(Debug, Clone, Serialize)]
pub struct ServerAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Bound socket address.
    pub bind: String,
}

impl ServerAuditEvent {
    /// Builds the startup event.
    #[must_use]
    pub fn started(bind: &str) -> Self {
        Self {
            event: "server_started",
            timestamp_ms: now_millis(),
            bind: bind.to_string(),
        }
    }
}

/// Returns milliseconds since the unix epoch.
pub(crate) fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for request and lifecycle events.
pub trait AuditSink: Send + Sync {
    /// Records a check event.
    fn record_check(&self, event: &CheckAuditEvent);

    /// Records a lifecycle event.
    fn record_server(&self, _event: &ServerAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_check(&self, event: &CheckAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_server(&self, event: &ServerAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one JSON line, ignoring write failures.
    fn append(&self, payload: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_check(&self, event: &CheckAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }

    fn record_server(&self, event: &ServerAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }
}
