// urlwarden-core/src/runtime/mod.rs
// ============================================================================
// Module: Urlwarden Runtime
// Description: Ordered inspection steps, engine, metrics, and test stores.
// Purpose: Execute the inspection pipeline with fixed step ordering.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime hosts the per-step functions and the [`UrlInspector`] engine
//! that sequences them. Step order within one request is fixed and must not
//! be reordered: the evasion pre-check inspects raw bytes that decoding
//! would otherwise normalize away.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod decode;
pub mod inspector;
pub mod memory;
pub mod metrics;
pub mod precheck;
pub mod reconstruct;
pub mod reputation;
pub mod sanitize;
pub mod signature;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use inspector::InspectError;
pub use inspector::PipelineConfig;
pub use inspector::UrlInspector;
pub use memory::InMemoryReputationStore;
pub use memory::InMemorySignatureStore;
pub use metrics::Classification;
pub use metrics::MetricsError;
pub use metrics::MetricsSnapshot;
pub use metrics::RecentCheck;
pub use metrics::SecurityMetrics;
pub use reconstruct::ReconstructError;
pub use validate::FormatViolation;
