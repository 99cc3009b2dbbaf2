//! Update filtering
//!
//! Version and artifact filters narrow the versions a resolver found:
//!
//! - [`version`]: predicates over a candidate version, built per artifact from
//!   its declared version by a [`VersionFilterFactory`]
//! - [`artifact`]: user exclusions deciding whether an artifact is checked and
//!   whether its update is reported
//! - [`ignore`]: exclusions read from `.mvnchk-ignore` files
//! - [`factories`]: qualifier, release and composite factories

use std::sync::Arc;

use crate::model::error::InvalidInputError;

pub mod artifact;
pub mod factories;
pub mod ignore;
pub mod version;

pub use artifact::{
    AcceptAll, ArtifactFilter, ArtifactFilterError, CompositeArtifactFilter, RejectAll,
    WildcardArtifactFilter,
};
pub use factories::{
    CompositeVersionFilterFactory, QualifierVersionFilterFactory, ReleaseVersionFilterFactory,
};
pub use ignore::{ArtifactFilterParseError, IgnoreRules};
pub use version::{SnapshotVersionFilter, VersionFilter, VersionFilterFactory, is_snapshot};

/// Builds the artifact filter of a build
///
/// Every ignore rule set must accept an artifact. When filter expressions are
/// given, at least one of them must match as well.
pub fn effective_filter(
    ignore_rules: &[Arc<dyn ArtifactFilter>],
    expressions: &[Arc<dyn ArtifactFilter>],
) -> Result<Arc<dyn ArtifactFilter>, InvalidInputError> {
    let mut required = ignore_rules.to_vec();
    if !expressions.is_empty() {
        required.push(Arc::new(CompositeArtifactFilter::any(expressions.to_vec())?));
    }

    match required.len() {
        0 => Ok(Arc::new(AcceptAll)),
        1 => Ok(required.swap_remove(0)),
        _ => Ok(Arc::new(CompositeArtifactFilter::all(required)?)),
    }
}
