//! Build manifests
//!
//! A manifest is the JSON form of a [`Build`] produced by a build-file front
//! end. Every entity goes through its constructor, so a manifest that loads
//! is a valid build.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::artifact::{Artifact, ArtifactIdentifier};
use crate::model::build::{Build, BuildFile, BuildFileType};
use crate::model::error::InvalidInputError;
use crate::model::repository::Repository;
use crate::model::types::{ArtifactType, RepositoryType, UnknownTypeError};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(#[from] InvalidInputError),

    #[error("Invalid manifest: {0}")]
    UnknownType(#[from] UnknownTypeError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildManifest {
    file: BuildFileManifest,
    #[serde(default)]
    repositories: Vec<RepositoryManifest>,
    #[serde(default)]
    artifacts: Vec<ArtifactManifest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildFileManifest {
    /// Build file type; detected from the file name when absent
    #[serde(rename = "type")]
    file_type: Option<String>,
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryManifest {
    #[serde(rename = "type")]
    repository_type: Option<String>,
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactManifest {
    #[serde(rename = "type")]
    artifact_type: String,
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    #[serde(default)]
    version_inherited: bool,
}

/// Parses a manifest held in memory
pub fn parse_build(content: &str) -> Result<Build, ManifestError> {
    let manifest: BuildManifest = serde_json::from_str(content)?;
    manifest.into_build(None)
}

/// Loads a manifest file
///
/// A relative build file path is taken relative to the manifest directory.
pub fn load_build(path: &Path) -> Result<Build, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: BuildManifest = serde_json::from_str(&content)?;
    manifest.into_build(path.parent())
}

impl BuildManifest {
    fn into_build(self, base_dir: Option<&Path>) -> Result<Build, ManifestError> {
        let file = self.file.into_build_file(base_dir)?;
        let repositories = self
            .repositories
            .into_iter()
            .map(RepositoryManifest::into_repository)
            .collect::<Result<Vec<_>, _>>()?;
        let artifacts = self
            .artifacts
            .into_iter()
            .map(ArtifactManifest::into_artifact)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Build::new(file, repositories, artifacts))
    }
}

impl BuildFileManifest {
    fn into_build_file(self, base_dir: Option<&Path>) -> Result<BuildFile, ManifestError> {
        let file_type = match self.file_type {
            Some(file_type) => file_type.parse::<BuildFileType>()?,
            None => self
                .path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(BuildFileType::from_file_name)
                .ok_or_else(|| UnknownTypeError(self.path.display().to_string()))?,
        };

        let path = match base_dir {
            Some(base_dir) if self.path.is_relative() => base_dir.join(&self.path),
            _ => self.path,
        };

        Ok(BuildFile::new(file_type, path)?)
    }
}

impl RepositoryManifest {
    fn into_repository(self) -> Result<Repository, ManifestError> {
        let repository_type = match self.repository_type {
            Some(repository_type) => repository_type.parse::<RepositoryType>()?,
            None => RepositoryType::Normal,
        };
        Ok(Repository::new(repository_type, self.id, self.url)?)
    }
}

impl ArtifactManifest {
    fn into_artifact(self) -> Result<Artifact, ManifestError> {
        let artifact_type = self.artifact_type.parse::<ArtifactType>()?;
        let identifier = ArtifactIdentifier::new(self.group_id, self.artifact_id)?;
        let artifact = Artifact::new(artifact_type, identifier, self.version)?;
        Ok(artifact.with_version_inherited(self.version_inherited))
    }
}
