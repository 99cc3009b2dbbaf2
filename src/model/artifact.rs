//! Artifact identity and declaration

use std::fmt;

use crate::model::error::{InvalidInputError, ensure_not_empty};
use crate::model::types::ArtifactType;

/// `groupId:artifactId` pair identifying an artifact independently of its version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactIdentifier {
    group_id: String,
    artifact_id: String,
}

impl ArtifactIdentifier {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Result<Self, InvalidInputError> {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        ensure_not_empty("groupId", &group_id)?;
        ensure_not_empty("artifactId", &artifact_id)?;
        Ok(Self {
            group_id,
            artifact_id,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
}

impl fmt::Display for ArtifactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Artifact declared by a build
///
/// An artifact without a version (managed or unresolved) is never update-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artifact {
    artifact_type: ArtifactType,
    identifier: ArtifactIdentifier,
    version: Option<String>,
    version_inherited: bool,
}

impl Artifact {
    pub fn new(
        artifact_type: impl Into<ArtifactType>,
        identifier: ArtifactIdentifier,
        version: Option<String>,
    ) -> Result<Self, InvalidInputError> {
        if let Some(version) = &version {
            ensure_not_empty("version", version)?;
        }
        Ok(Self {
            artifact_type: artifact_type.into(),
            identifier,
            version,
            version_inherited: false,
        })
    }

    /// Copy of this artifact reclassified under another type
    pub fn with_type(&self, artifact_type: impl Into<ArtifactType>) -> Self {
        Self {
            artifact_type: artifact_type.into(),
            ..self.clone()
        }
    }

    /// Copy of this artifact flagged as taking its version from a parent build
    pub fn with_version_inherited(&self, version_inherited: bool) -> Self {
        Self {
            version_inherited,
            ..self.clone()
        }
    }

    pub fn artifact_type(&self) -> ArtifactType {
        self.artifact_type
    }

    pub fn identifier(&self) -> &ArtifactIdentifier {
        &self.identifier
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn is_version_inherited(&self) -> bool {
        self.version_inherited
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.artifact_type, self.identifier)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}
