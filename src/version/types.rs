//! Resolution results

use crate::model::artifact::Artifact;
use crate::model::error::{InvalidInputError, ensure_not_empty};

/// Versions published for an artifact, in ascending version order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactAvailableVersions {
    artifact: Artifact,
    available_versions: Vec<String>,
}

impl ArtifactAvailableVersions {
    /// Copies `available_versions`, rejecting empty entries
    pub fn new<I, S>(artifact: Artifact, available_versions: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available_versions: Vec<String> =
            available_versions.into_iter().map(Into::into).collect();
        if available_versions.iter().any(String::is_empty) {
            return Err(InvalidInputError::EmptyElement("availableVersions"));
        }
        Ok(Self {
            artifact,
            available_versions,
        })
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn available_versions(&self) -> &[String] {
        &self.available_versions
    }

    pub fn is_empty(&self) -> bool {
        self.available_versions.is_empty()
    }
}

/// Recommended update for an artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactUpdateVersion {
    artifact: Artifact,
    update_version: String,
}

impl ArtifactUpdateVersion {
    pub fn new(
        artifact: Artifact,
        update_version: impl Into<String>,
    ) -> Result<Self, InvalidInputError> {
        let update_version = update_version.into();
        ensure_not_empty("updateVersion", &update_version)?;
        Ok(Self {
            artifact,
            update_version,
        })
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn update_version(&self) -> &str {
        &self.update_version
    }
}
