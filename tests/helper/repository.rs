//! Repository test utilities

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use mvnchk::model::artifact::{Artifact, ArtifactIdentifier};
use mvnchk::model::repository::Repository;
use mvnchk::model::types::{ArtifactType, RepositoryType};
use mvnchk::version::error::RegistryError;
use mvnchk::version::registry::RepositoryMetadataService;

/// Metadata service serving fixed version lists per repository
#[derive(Default)]
pub struct FixedVersionsService {
    versions: HashMap<(String, String), Vec<String>>,
    failing: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl FixedVersionsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `versions` for `coordinates` (`groupId:artifactId`) from `repository_id`
    pub fn with_versions(mut self, repository_id: &str, coordinates: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            (repository_id.to_string(), coordinates.to_string()),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Fails every query sent to `repository_id`
    pub fn with_failing(mut self, repository_id: &str) -> Self {
        self.failing.insert(repository_id.to_string());
        self
    }

    /// Queries received so far, as `repositoryId/groupId:artifactId`
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryMetadataService for FixedVersionsService {
    async fn list_versions(
        &self,
        identifier: &ArtifactIdentifier,
        repository: &Repository,
    ) -> Result<Vec<String>, RegistryError> {
        self.queries
            .lock()
            .unwrap()
            .push(format!("{}/{}", repository.id(), identifier));

        if self.failing.contains(repository.id()) {
            return Err(RegistryError::InvalidResponse(format!(
                "{} is unavailable",
                repository.id()
            )));
        }

        self.versions
            .get(&(repository.id().to_string(), identifier.to_string()))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(identifier.to_string()))
    }
}

pub fn repository(repository_type: RepositoryType, id: &str, url: &str) -> Repository {
    Repository::new(repository_type, id, url).unwrap()
}

/// Artifact from a `type` such as `maven:dependency` and `groupId:artifactId` coordinates
pub fn artifact(artifact_type: &str, coordinates: &str, version: Option<&str>) -> Artifact {
    let (group_id, artifact_id) = coordinates.split_once(':').unwrap();
    Artifact::new(
        artifact_type.parse::<ArtifactType>().unwrap(),
        ArtifactIdentifier::new(group_id, artifact_id).unwrap(),
        version.map(str::to_string),
    )
    .unwrap()
}
