//! Version filter traits and the canonical snapshot detector

use std::sync::LazyLock;

use regex::Regex;

use crate::model::error::{InvalidInputError, ensure_not_empty};

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Last alphabetic run of a version, optionally followed by a separator and a build number
static QUALIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^.*?[.\-]?([a-z]+)[.\-]?\d*$").unwrap()
});

/// Predicate over a candidate version
pub trait VersionFilter: Send + Sync {
    /// Fails with [`InvalidInputError`] when `version` is empty
    fn accept(&self, version: &str) -> Result<bool, InvalidInputError>;
}

/// Builds a [`VersionFilter`] bound to the version an artifact currently declares
pub trait VersionFilterFactory: Send + Sync {
    fn create(&self, declared_version: &str) -> Result<Box<dyn VersionFilter>, InvalidInputError>;
}

/// Accepts exactly the versions ending with `-SNAPSHOT`
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotVersionFilter;

impl VersionFilter for SnapshotVersionFilter {
    fn accept(&self, version: &str) -> Result<bool, InvalidInputError> {
        ensure_not_empty("version", version)?;
        Ok(is_snapshot(version))
    }
}

/// `true` for canonical snapshots like `1.2.3-SNAPSHOT`
pub fn is_snapshot(version: &str) -> bool {
    version.ends_with(SNAPSHOT_SUFFIX)
}

/// Extracts the trailing qualifier of a version
///
/// `1.0.0-rc1` gives `rc`, `2.0.0.Final` gives `Final` and `1.0.0` gives `None`.
pub fn extract_qualifier(version: &str) -> Option<&str> {
    QUALIFIER_PATTERN
        .captures(version)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
