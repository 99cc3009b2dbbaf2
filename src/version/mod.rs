//! Version resolution layer
//!
//! This module fetches the versions each repository publishes for an
//! artifact, merges them in Maven order and selects the update to recommend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Resolver   │────▶│  Selector   │
//! │ (metadata)  │     │   (merge)   │     │  (filter)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │MavenVersion │
//! │(maven-meta) │                         │(version cmp)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Metadata service trait, the single point of network interaction
//! - [`registries`]: `maven-metadata.xml` implementation over HTTP
//! - [`session`]: HTTP client and repository settings shared by all queries
//! - [`resolver`]: Repository-type-aware aggregation of available versions
//! - [`selector`]: Best update selection through the filter chain
//! - [`maven_version`]: Maven version ordering
//! - [`error`]: Registry, resolution and session errors
//! - [`types`]: Resolution results

pub mod error;
pub mod maven_version;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod selector;
pub mod session;
pub mod types;
