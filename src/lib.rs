//! Checks the artifacts of Maven and Gradle builds against their remote
//! repositories and reports the available updates.
//!
//! - [`model`]: Artifacts, repositories and builds
//! - [`manifest`]: JSON build manifests
//! - [`version`]: Repository metadata, resolution and update selection
//! - [`filter`]: Version and artifact filters
//! - [`check`]: Per-build update checks
//! - [`config`]: Run configuration and well-known paths
//! - [`cancel`]: Run-level cancellation

pub mod cancel;
pub mod check;
pub mod config;
pub mod filter;
pub mod manifest;
pub mod model;
pub mod version;
