//! Cross-module tests for the attachment core.
//!
//! # Test Structure
//!
//! - `scenarios.rs`: attach/detach behavior on small hand-built assemblies
//! - `properties.rs`: proptest properties over random registries and op sequences
//! - `determinism.rs`: seeded replays produce identical occupancy
//! - `concurrency.rs`: contention on a [`SharedAssembly`](crate::SharedAssembly)
//! - `helpers.rs`: assembly builders and a call-recording host

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
