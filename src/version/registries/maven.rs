//! Maven repository metadata implementation

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::artifact::ArtifactIdentifier;
use crate::model::repository::Repository;
use crate::version::error::RegistryError;
use crate::version::registries::metadata::parse_metadata;
use crate::version::registry::RepositoryMetadataService;
use crate::version::session::MavenSession;

/// Lists versions from `maven-metadata.xml` over HTTP
pub struct MavenMetadataService {
    session: Arc<MavenSession>,
}

impl MavenMetadataService {
    pub fn new(session: Arc<MavenSession>) -> Self {
        Self { session }
    }

    /// `{base}/{group path}/{artifactId}/maven-metadata.xml`
    fn metadata_url(base_url: &str, identifier: &ArtifactIdentifier) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            base_url.trim_end_matches('/'),
            identifier.group_id().replace('.', "/"),
            identifier.artifact_id()
        )
    }
}

#[async_trait::async_trait]
impl RepositoryMetadataService for MavenMetadataService {
    async fn list_versions(
        &self,
        identifier: &ArtifactIdentifier,
        repository: &Repository,
    ) -> Result<Vec<String>, RegistryError> {
        if self.session.is_offline() {
            return Err(RegistryError::Offline(repository.id().to_string()));
        }

        let endpoint = self.session.endpoint(repository);
        let url = Self::metadata_url(endpoint.url, identifier);
        debug!("Fetching Maven metadata: {}", url);

        let mut request = self.session.client().get(&url);
        if let Some(server) = self.session.credentials(endpoint.id) {
            request = request.basic_auth(&server.username, server.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(identifier.to_string()));
        }

        if !status.is_success() {
            warn!("Repository {} returned status {}: {}", endpoint.id, status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        let metadata = parse_metadata(&body).inspect_err(|e| {
            warn!("Failed to parse Maven metadata from {}: {}", url, e);
        })?;

        Ok(metadata.versions().to_vec())
    }
}
