// urlwarden-core/src/runtime/metrics.rs
// ============================================================================
// Module: Security Metrics
// Description: Atomic counters, per-second buckets, and recent-check history.
// Purpose: Record decision outcomes without ever affecting the verdict.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! All metrics state lives behind one mutex so increment-and-prune is
//! applied atomically under concurrent requests; the raw map is never
//! exposed for direct mutation. The recorder never reads wall-clock time:
//! hosts supply unix-epoch seconds with every call, which keeps windowing
//! behavior deterministic under test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::records::ReputationStatus;
use crate::core::verdict::CheckReport;
use crate::core::verdict::Decision;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Trailing retention window for per-second buckets, in seconds.
pub const TRAILING_WINDOW_SECS: i64 = 120;
/// Length of the requests-per-second history in a snapshot.
pub const RPS_HISTORY_SECS: i64 = 60;
/// Maximum entries retained in the recent-checks ring.
pub const RECENT_CHECKS_LIMIT: usize = 10;

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Outcome category recorded for each completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Allowed with a reputation record marking the hostname safe.
    Safe,
    /// Denied with threat evidence.
    Threat,
    /// Everything else: unknown hostnames and format rejections.
    Unknown,
}

impl Classification {
    /// Derives the metrics category from a finished check report.
    #[must_use]
    pub fn from_report(report: &CheckReport) -> Self {
        if report.decision == Decision::Deny {
            if report.threat_detected.is_some() {
                Self::Threat
            } else {
                Self::Unknown
            }
        } else if report.security_checks.domain_reputation.found
            && report.security_checks.domain_reputation.status == ReputationStatus::Safe
        {
            Self::Safe
        } else {
            Self::Unknown
        }
    }
}

// ============================================================================
// SECTION: Snapshot Types
// ============================================================================

/// Compact record of one completed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCheck {
    /// Sanitized URL that was checked.
    pub url: String,
    /// Outcome category.
    pub status: Classification,
    /// Check time in unix-epoch seconds.
    pub timestamp: i64,
}

/// Point-in-time view of the metrics state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total completed checks since process start.
    pub total_checks: u64,
    /// Checks classified safe.
    pub safe: u64,
    /// Checks that detected a threat.
    pub threats_detected: u64,
    /// Checks with no classification evidence.
    pub unknown: u64,
    /// Requests per second over the trailing minute, oldest first.
    pub requests_per_second: Vec<u64>,
    /// Most recent checks, newest first.
    pub recent_checks: Vec<RecentCheck>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Metrics recording errors.
///
/// Callers must treat these as observability loss only; a metrics failure
/// never changes the verdict returned for the request.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The metrics mutex was poisoned by a panicking writer.
    #[error("metrics state mutex poisoned")]
    Poisoned,
}

// ============================================================================
// SECTION: Metrics State
// ============================================================================

/// Mutable metrics state guarded by the [`SecurityMetrics`] mutex.
#[derive(Debug, Default)]
struct MetricsState {
    /// Total completed checks.
    total_checks: u64,
    /// Checks classified safe.
    safe: u64,
    /// Checks that detected a threat.
    threats: u64,
    /// Checks with no classification evidence.
    unknown: u64,
    /// Request count per unix-epoch second.
    per_second: BTreeMap<i64, u64>,
    /// Recent checks, newest first, capped at [`RECENT_CHECKS_LIMIT`].
    recent: Vec<RecentCheck>,
}

/// Process-wide metrics recorder shared across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct SecurityMetrics {
    /// Metrics state protected by a mutex.
    state: Arc<Mutex<MetricsState>>,
}

impl SecurityMetrics {
    /// Creates an empty metrics recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed check at the supplied unix-epoch second.
    ///
    /// Atomically increments the total and category counters, bumps the
    /// current second's bucket, evicts buckets older than
    /// [`TRAILING_WINDOW_SECS`], and prepends to the recent-checks ring.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Poisoned`] when the state mutex is poisoned.
    pub fn record(
        &self,
        url: String,
        status: Classification,
        now: i64,
    ) -> Result<(), MetricsError> {
        let mut state = self.state.lock().map_err(|_| MetricsError::Poisoned)?;
        state.total_checks += 1;
        match status {
            Classification::Safe => state.safe += 1,
            Classification::Threat => state.threats += 1,
            Classification::Unknown => state.unknown += 1,
        }
        *state.per_second.entry(now).or_insert(0) += 1;
        let horizon = now - TRAILING_WINDOW_SECS;
        state.per_second.retain(|second, _| *second > horizon);
        state.recent.insert(
            0,
            RecentCheck {
                url,
                status,
                timestamp: now,
            },
        );
        state.recent.truncate(RECENT_CHECKS_LIMIT);
        Ok(())
    }

    /// Produces a snapshot with a trailing [`RPS_HISTORY_SECS`]-second history.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Poisoned`] when the state mutex is poisoned.
    pub fn snapshot(&self, now: i64) -> Result<MetricsSnapshot, MetricsError> {
        let state = self.state.lock().map_err(|_| MetricsError::Poisoned)?;
        let requests_per_second = (0..RPS_HISTORY_SECS)
            .map(|offset| {
                let second = now - (RPS_HISTORY_SECS - 1 - offset);
                state.per_second.get(&second).copied().unwrap_or(0)
            })
            .collect();
        Ok(MetricsSnapshot {
            total_checks: state.total_checks,
            safe: state.safe,
            threats_detected: state.threats,
            unknown: state.unknown,
            requests_per_second,
            recent_checks: state.recent.clone(),
        })
    }
}
