// urlwarden-core/src/runtime/memory.rs
// ============================================================================
// Module: Urlwarden In-Memory Stores
// Description: Simple in-memory reference stores for tests and demos.
// Purpose: Provide deterministic store implementations without external deps.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! In-memory implementations of the store interfaces, populated at
//! construction and immutable afterward. Useful for tests, local demos,
//! and deployments that prefer a fixed built-in rule set over SQLite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::records::ReputationRecord;
use crate::core::records::SignatureRecord;
use crate::interfaces::ReputationStore;
use crate::interfaces::SignatureStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Signature Store
// ============================================================================

/// In-memory ordered signature store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySignatureStore {
    /// Records in store order.
    records: Vec<SignatureRecord>,
}

impl InMemorySignatureStore {
    /// Creates an empty signature store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates a store from records, preserving their order.
    #[must_use]
    pub fn with_records(records: Vec<SignatureRecord>) -> Self {
        Self {
            records,
        }
    }

    /// Appends a record at the end of the store order.
    pub fn push(&mut self, record: SignatureRecord) {
        self.records.push(record);
    }
}

impl SignatureStore for InMemorySignatureStore {
    fn records(&self) -> Result<Vec<SignatureRecord>, StoreError> {
        Ok(self.records.clone())
    }
}

// ============================================================================
// SECTION: In-Memory Reputation Store
// ============================================================================

/// In-memory keyed reputation store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReputationStore {
    /// Records keyed by hostname.
    records: BTreeMap<String, ReputationRecord>,
}

impl InMemoryReputationStore {
    /// Creates an empty reputation store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Creates a store from records, keyed by their hostnames.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = ReputationRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.hostname.clone(), record))
            .collect();
        Self {
            records,
        }
    }

    /// Inserts or replaces the record for its hostname.
    pub fn insert(&mut self, record: ReputationRecord) {
        self.records.insert(record.hostname.clone(), record);
    }
}

impl ReputationStore for InMemoryReputationStore {
    fn lookup(&self, hostname: &str) -> Result<Option<ReputationRecord>, StoreError> {
        Ok(self.records.get(hostname).cloned())
    }
}
