//! Qualifier consistency filter

use tracing::debug;

use crate::filter::version::{VersionFilter, VersionFilterFactory, extract_qualifier};
use crate::model::error::{InvalidInputError, ensure_not_empty};

/// Keeps candidates whose qualifier matches the declared one
///
/// A candidate is accepted when either side has no qualifier, or when both
/// qualifiers are equal ignoring case. A `1.0.0` artifact can move to
/// `1.1.0-jre`, but a `1.0.0-android` artifact is not offered `1.1.0-jre`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualifierVersionFilterFactory;

impl QualifierVersionFilterFactory {
    pub fn new() -> Self {
        Self
    }
}

impl VersionFilterFactory for QualifierVersionFilterFactory {
    fn create(&self, declared_version: &str) -> Result<Box<dyn VersionFilter>, InvalidInputError> {
        ensure_not_empty("declaredVersion", declared_version)?;
        Ok(Box::new(QualifierVersionFilter {
            declared_qualifier: extract_qualifier(declared_version).map(str::to_string),
        }))
    }
}

struct QualifierVersionFilter {
    declared_qualifier: Option<String>,
}

impl VersionFilter for QualifierVersionFilter {
    fn accept(&self, version: &str) -> Result<bool, InvalidInputError> {
        ensure_not_empty("version", version)?;
        let accepted = match (extract_qualifier(version), &self.declared_qualifier) {
            (Some(candidate), Some(declared)) => candidate.eq_ignore_ascii_case(declared),
            _ => true,
        };
        if !accepted {
            debug!(
                "Rejecting {}: qualifier differs from {:?}",
                version, self.declared_qualifier
            );
        }
        Ok(accepted)
    }
}
