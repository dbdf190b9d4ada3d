// urlwarden-config/src/lib.rs
// ============================================================================
// Module: Urlwarden Configuration Library
// Description: Public API surface for configuration loading.
// Purpose: Expose strict, fail-closed configuration types.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. Missing or invalid configuration fails closed to preserve the
//! service's security posture; every section carries usable defaults so an
//! absent section never aborts startup.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditSection;
pub use config::AuditSinkKind;
pub use config::ConfigError;
pub use config::PipelineSection;
pub use config::ServerSection;
pub use config::StoreBackend;
pub use config::StoresSection;
pub use config::UrlwardenConfig;
