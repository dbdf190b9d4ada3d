// urlwarden-core/src/interfaces/mod.rs
// ============================================================================
// Module: Urlwarden Store Interfaces
// Description: Backend-agnostic interfaces for reference-data stores.
// Purpose: Define the contract surfaces used by the inspection runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the pipeline reads its reference data without
//! embedding backend-specific details. Both stores are read-only at request
//! time; implementations must fail with [`StoreError`] rather than invent
//! data when the backend is unreachable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::records::ReputationRecord;
use crate::core::records::SignatureRecord;

// ============================================================================
// SECTION: Store Error
// ============================================================================

/// Reference-store access errors.
///
/// Store failure is fatal for the affected request and must never be folded
/// into an ALLOW or DENY verdict.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store backend could not be reached or queried.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// SECTION: Signature Store
// ============================================================================

/// Read-only ordered collection of known-malicious signature records.
pub trait SignatureStore {
    /// Returns all signature records in store order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be queried.
    fn records(&self) -> Result<Vec<SignatureRecord>, StoreError>;
}

/// Shared, clonable handle to a dynamic signature store.
#[derive(Clone)]
pub struct SharedSignatureStore {
    /// Inner store implementation.
    inner: Arc<dyn SignatureStore + Send + Sync>,
}

impl SharedSignatureStore {
    /// Wraps a signature store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl SignatureStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn SignatureStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl SignatureStore for SharedSignatureStore {
    fn records(&self) -> Result<Vec<SignatureRecord>, StoreError> {
        self.inner.records()
    }
}

// ============================================================================
// SECTION: Reputation Store
// ============================================================================

/// Read-only keyed repository of hostname reputation records.
pub trait ReputationStore {
    /// Looks up a reputation record by exact hostname match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be queried.
    fn lookup(&self, hostname: &str) -> Result<Option<ReputationRecord>, StoreError>;
}

/// Shared, clonable handle to a dynamic reputation store.
#[derive(Clone)]
pub struct SharedReputationStore {
    /// Inner store implementation.
    inner: Arc<dyn ReputationStore + Send + Sync>,
}

impl SharedReputationStore {
    /// Wraps a reputation store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl ReputationStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn ReputationStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl ReputationStore for SharedReputationStore {
    fn lookup(&self, hostname: &str) -> Result<Option<ReputationRecord>, StoreError> {
        self.inner.lookup(hostname)
    }
}
