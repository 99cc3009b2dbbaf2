//! Metadata service trait for listing the versions a repository publishes

#[cfg(test)]
use mockall::automock;

use crate::model::artifact::ArtifactIdentifier;
use crate::model::repository::Repository;
use crate::version::error::RegistryError;

/// Single point of network interaction with remote repositories
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RepositoryMetadataService: Send + Sync {
    /// Lists every version of an artifact published by one repository
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Versions in the order the repository reports them
    /// * `Err(RegistryError::NotFound)` - The repository does not know the artifact
    /// * `Err(RegistryError)` - Any other transport or metadata failure
    async fn list_versions(
        &self,
        identifier: &ArtifactIdentifier,
        repository: &Repository,
    ) -> Result<Vec<String>, RegistryError>;
}
