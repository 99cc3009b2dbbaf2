//! Repository metadata service implementations

pub mod maven;
pub mod metadata;

pub use maven::MavenMetadataService;
pub use metadata::{MavenMetadata, parse_metadata};
