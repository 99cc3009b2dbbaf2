//! Stable release filter

use crate::filter::version::{VersionFilter, VersionFilterFactory, extract_qualifier};
use crate::model::error::{InvalidInputError, ensure_not_empty};

/// Qualifiers marking a pre-release, compared ignoring case
const PRE_RELEASE_QUALIFIERS: &[&str] = &[
    "alpha", "a", "beta", "b", "milestone", "m", "rc", "cr", "snapshot",
];

/// Rejects pre-release candidates whatever the declared version is
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseVersionFilterFactory;

impl ReleaseVersionFilterFactory {
    pub fn new() -> Self {
        Self
    }
}

impl VersionFilterFactory for ReleaseVersionFilterFactory {
    fn create(&self, declared_version: &str) -> Result<Box<dyn VersionFilter>, InvalidInputError> {
        ensure_not_empty("declaredVersion", declared_version)?;
        Ok(Box::new(ReleaseVersionFilter))
    }
}

struct ReleaseVersionFilter;

impl VersionFilter for ReleaseVersionFilter {
    fn accept(&self, version: &str) -> Result<bool, InvalidInputError> {
        ensure_not_empty("version", version)?;
        Ok(!is_pre_release(version))
    }
}

fn is_pre_release(version: &str) -> bool {
    extract_qualifier(version).is_some_and(|qualifier| {
        PRE_RELEASE_QUALIFIERS
            .iter()
            .any(|known| qualifier.eq_ignore_ascii_case(known))
    })
}
