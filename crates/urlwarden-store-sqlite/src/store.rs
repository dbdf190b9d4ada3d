// urlwarden-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Reference Stores
// Description: Durable signature and reputation stores backed by SQLite WAL.
// Purpose: Serve read-only reference data with linear scans and exact lookups.
// Dependencies: urlwarden-core, rusqlite, thiserror
// ============================================================================

//! ## Overview
//! Each store owns one connection behind a mutex. The signature table keeps
//! an integer primary key so the scan order seen by the matcher is the
//! insertion order; the reputation table is keyed by hostname for exact
//! lookups. Request-path reads map every backend failure to
//! [`StoreError::Unavailable`] so the pipeline treats the request as failed
//! rather than inventing a verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use thiserror::Error;
use urlwarden_core::PatternType;
use urlwarden_core::ReputationRecord;
use urlwarden_core::ReputationStatus;
use urlwarden_core::ReputationStore;
use urlwarden_core::SignatureRecord;
use urlwarden_core::SignatureStore;
use urlwarden_core::StoreError;
use urlwarden_core::ThreatType;

use crate::seed::default_reputation;
use crate::seed::default_signatures;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Signature table schema.
const SIGNATURE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS signatures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern TEXT NOT NULL,
    pattern_type TEXT NOT NULL,
    threat_type TEXT NOT NULL,
    description TEXT NOT NULL
);
";

/// Reputation table schema.
const REPUTATION_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS domain_reputation (
    hostname TEXT PRIMARY KEY,
    status TEXT NOT NULL,
    description TEXT,
    last_updated TEXT
);
";

// ============================================================================
// SECTION: Config
// ============================================================================

/// Connection settings shared by both SQLite stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStoreConfig {
    /// Database file path.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// SQLite store maintenance errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Database could not be opened or configured.
    #[error("sqlite open error: {0}")]
    Open(String),
    /// Schema creation failed.
    #[error("sqlite schema error: {0}")]
    Schema(String),
    /// A statement failed to execute.
    #[error("sqlite query error: {0}")]
    Query(String),
    /// The connection mutex was poisoned.
    #[error("sqlite store mutex poisoned")]
    Poisoned,
}

// ============================================================================
// SECTION: Connection Setup
// ============================================================================

/// Opens a connection with WAL journaling and a busy timeout applied.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let conn =
        Connection::open(&config.path).map_err(|err| SqliteStoreError::Open(err.to_string()))?;
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
    conn.pragma_update(None, "journal_mode", "wal")
        .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
    conn.pragma_update(None, "synchronous", "normal")
        .map_err(|err| SqliteStoreError::Open(err.to_string()))?;
    Ok(conn)
}

/// Maps a backend failure onto the request-path store error.
fn unavailable(err: &rusqlite::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

// ============================================================================
// SECTION: Signature Store
// ============================================================================

/// SQLite-backed ordered signature store.
pub struct SqliteSignatureStore {
    /// Connection protected by a mutex.
    conn: Mutex<Connection>,
}

impl SqliteSignatureStore {
    /// Opens the store, creating the schema when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// the schema cannot be created.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        let conn = open_connection(config)?;
        conn.execute_batch(SIGNATURE_SCHEMA)
            .map_err(|err| SqliteStoreError::Schema(err.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Appends a signature record at the end of the scan order.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Query`] when the insert fails.
    pub fn insert(&self, record: &SignatureRecord) -> Result<(), SqliteStoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO signatures (pattern, pattern_type, threat_type, description) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.pattern,
                record.pattern_type.as_str(),
                record.threat_type.as_str(),
                record.description
            ],
        )
        .map_err(|err| SqliteStoreError::Query(err.to_string()))?;
        Ok(())
    }

    /// Returns the number of stored signatures.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Query`] when the count fails.
    pub fn count(&self) -> Result<u64, SqliteStoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM signatures", [], |row| row.get::<_, i64>(0).map(|n| n as u64))
            .map_err(|err| SqliteStoreError::Query(err.to_string()))
    }

    /// Seeds the default signatures when the table is empty.
    ///
    /// Returns the number of inserted records (zero when already seeded).
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when counting or inserting fails.
    pub fn seed_defaults(&self) -> Result<usize, SqliteStoreError> {
        if self.count()? > 0 {
            return Ok(0);
        }
        let records = default_signatures();
        for record in &records {
            self.insert(record)?;
        }
        Ok(records.len())
    }

    /// Locks the connection, surfacing poisoning as a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.conn.lock().map_err(|_| SqliteStoreError::Poisoned)
    }
}

impl SignatureStore for SqliteSignatureStore {
    fn records(&self) -> Result<Vec<SignatureRecord>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Unavailable("signature store mutex poisoned".to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT pattern, pattern_type, threat_type, description \
                 FROM signatures ORDER BY id",
            )
            .map_err(|err| unavailable(&err))?;
        let rows = stmt
            .query_map([], |row| {
                let pattern: String = row.get(0)?;
                let pattern_type: String = row.get(1)?;
                let threat_type: String = row.get(2)?;
                let description: String = row.get(3)?;
                Ok(SignatureRecord {
                    pattern,
                    pattern_type: PatternType::from_label(&pattern_type),
                    threat_type: ThreatType::from_label(&threat_type),
                    description,
                })
            })
            .map_err(|err| unavailable(&err))?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|err| unavailable(&err))?);
        }
        Ok(records)
    }
}

// ============================================================================
// SECTION: Reputation Store
// ============================================================================

/// SQLite-backed keyed reputation store.
pub struct SqliteReputationStore {
    /// Connection protected by a mutex.
    conn: Mutex<Connection>,
}

impl SqliteReputationStore {
    /// Opens the store, creating the schema when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// the schema cannot be created.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        let conn = open_connection(config)?;
        conn.execute_batch(REPUTATION_SCHEMA)
            .map_err(|err| SqliteStoreError::Schema(err.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts or replaces the record for its hostname.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Query`] when the upsert fails.
    pub fn insert(&self, record: &ReputationRecord) -> Result<(), SqliteStoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO domain_reputation \
             (hostname, status, description, last_updated) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.hostname,
                record.status.as_str(),
                record.description,
                record.last_updated
            ],
        )
        .map_err(|err| SqliteStoreError::Query(err.to_string()))?;
        Ok(())
    }

    /// Returns the number of stored reputation records.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Query`] when the count fails.
    pub fn count(&self) -> Result<u64, SqliteStoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM domain_reputation", [], |row| row.get::<_, i64>(0).map(|n| n as u64))
            .map_err(|err| SqliteStoreError::Query(err.to_string()))
    }

    /// Seeds the default reputation entries when the table is empty.
    ///
    /// Returns the number of inserted records (zero when already seeded).
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when counting or inserting fails.
    pub fn seed_defaults(&self) -> Result<usize, SqliteStoreError> {
        if self.count()? > 0 {
            return Ok(0);
        }
        let records = default_reputation();
        for record in &records {
            self.insert(record)?;
        }
        Ok(records.len())
    }

    /// Locks the connection, surfacing poisoning as a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.conn.lock().map_err(|_| SqliteStoreError::Poisoned)
    }
}

impl ReputationStore for SqliteReputationStore {
    fn lookup(&self, hostname: &str) -> Result<Option<ReputationRecord>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Unavailable("reputation store mutex poisoned".to_string()))?;
        conn.query_row(
            "SELECT hostname, status, description, last_updated \
             FROM domain_reputation WHERE hostname = ?1",
            params![hostname],
            |row| {
                let hostname: String = row.get(0)?;
                let status: String = row.get(1)?;
                let description: Option<String> = row.get(2)?;
                let last_updated: Option<String> = row.get(3)?;
                Ok(ReputationRecord {
                    hostname,
                    status: ReputationStatus::from_label(&status),
                    description,
                    last_updated,
                })
            },
        )
        .optional()
        .map_err(|err| unavailable(&err))
    }
}
