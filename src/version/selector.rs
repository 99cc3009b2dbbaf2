//! Update selection
//!
//! Picks, among the versions resolved for an artifact, the highest one that
//! survives the filters and is strictly newer than the declared version.

use tracing::debug;

use crate::filter::artifact::ArtifactFilter;
use crate::filter::version::{VersionFilter, is_snapshot};
use crate::model::error::InvalidInputError;
use crate::version::maven_version::{MavenVersion, compare_versions};
use crate::version::types::{ArtifactAvailableVersions, ArtifactUpdateVersion};

/// Selects the update to recommend for an artifact, if any
///
/// `version_filter` must have been created from the artifact's declared
/// version. Snapshot candidates are only considered when the declared
/// version is itself a snapshot.
pub fn select_update(
    available: &ArtifactAvailableVersions,
    version_filter: &dyn VersionFilter,
    artifact_filter: &dyn ArtifactFilter,
) -> Result<Option<ArtifactUpdateVersion>, InvalidInputError> {
    let artifact = available.artifact();
    let Some(declared) = artifact.version() else {
        return Ok(None);
    };
    if available.is_empty() {
        return Ok(None);
    }

    let declared_version = MavenVersion::parse(declared);
    let allow_snapshots = is_snapshot(declared);

    let mut candidates = Vec::new();
    for candidate in available.available_versions() {
        if !allow_snapshots && is_snapshot(candidate) {
            continue;
        }
        if !version_filter.accept(candidate)? {
            continue;
        }
        if MavenVersion::parse(candidate) <= declared_version {
            continue;
        }
        candidates.push(candidate.as_str());
    }

    let Some(update) = candidates
        .into_iter()
        .max_by(|a, b| compare_versions(a, b))
    else {
        debug!("No update candidate for {}", artifact);
        return Ok(None);
    };

    if !artifact_filter.accept_update(artifact, update)? {
        debug!("Update {} of {} is ignored", update, artifact);
        return Ok(None);
    }

    Ok(Some(ArtifactUpdateVersion::new(artifact.clone(), update)?))
}
