//! Available-versions resolution
//!
//! Aggregates the versions published for an artifact across the repositories
//! eligible for its type. Queries to each repository run concurrently, every
//! one with its own timeout, and their results are merged and sorted only
//! once all of them have completed.

use std::sync::Arc;
use std::time::Duration;

use futures::future::{join_all, try_join_all};
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::config::FETCH_TIMEOUT_MS;
use crate::model::artifact::{Artifact, ArtifactIdentifier};
use crate::model::repository::Repository;
use crate::version::error::{RegistryError, RepositoryFailure, ResolveError};
use crate::version::maven_version::sort_versions;
use crate::version::registry::RepositoryMetadataService;
use crate::version::types::ArtifactAvailableVersions;

#[async_trait::async_trait]
pub trait AvailableVersionsResolver: Send + Sync {
    /// Resolves the versions of `artifact` published by the eligible subset of `repositories`
    ///
    /// # Returns
    /// * `Ok(ArtifactAvailableVersions)` - Deduplicated versions in ascending order,
    ///   empty when no repository is eligible
    /// * `Err(ResolveError)` - Failure scoped to this artifact
    async fn resolve(
        &self,
        artifact: &Artifact,
        repositories: &[Repository],
    ) -> Result<ArtifactAvailableVersions, ResolveError>;
}

/// Resolver querying each eligible repository through a [`RepositoryMetadataService`]
pub struct RepositoryVersionsResolver {
    service: Arc<dyn RepositoryMetadataService>,
    timeout: Duration,
    fail_fast: bool,
    cancel: CancellationToken,
}

impl RepositoryVersionsResolver {
    pub fn new(service: Arc<dyn RepositoryMetadataService>) -> Self {
        Self {
            service,
            timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
            fail_fast: false,
            cancel: CancellationToken::never(),
        }
    }

    /// Timeout applied to every single repository query
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fails the artifact on the first repository failure instead of tolerating it
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    async fn query(
        &self,
        identifier: &ArtifactIdentifier,
        repository: &Repository,
    ) -> Result<Vec<String>, RegistryError> {
        let query = tokio::time::timeout(
            self.timeout,
            self.service.list_versions(identifier, repository),
        );

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RegistryError::Cancelled),
            result = query => result.unwrap_or_else(|_| {
                Err(RegistryError::Timeout {
                    timeout_ms: self.timeout.as_millis(),
                })
            }),
        }
    }

    /// Queries one repository; an unknown artifact counts as no versions
    async fn fetch(
        &self,
        identifier: &ArtifactIdentifier,
        repository: &Repository,
    ) -> Result<Vec<String>, RepositoryFailure> {
        match self.query(identifier, repository).await {
            Ok(versions) => {
                debug!(
                    "Repository {} lists {} versions of {}",
                    repository.id(),
                    versions.len(),
                    identifier
                );
                Ok(versions)
            }
            Err(RegistryError::NotFound(_)) => {
                debug!("{} not found in repository {}", identifier, repository.id());
                Ok(Vec::new())
            }
            Err(error) => {
                if !matches!(error, RegistryError::Cancelled) {
                    warn!(
                        "Failed to list versions of {} from {}: {}",
                        identifier, repository, error
                    );
                }
                Err(RepositoryFailure {
                    repository_id: repository.id().to_string(),
                    error,
                })
            }
        }
    }
}

fn single_failure(identifier: &ArtifactIdentifier, failure: RepositoryFailure) -> ResolveError {
    match failure.error {
        RegistryError::Cancelled => ResolveError::Cancelled(identifier.clone()),
        _ => ResolveError::RepositoryFailed {
            identifier: identifier.clone(),
            failure,
        },
    }
}

#[async_trait::async_trait]
impl AvailableVersionsResolver for RepositoryVersionsResolver {
    async fn resolve(
        &self,
        artifact: &Artifact,
        repositories: &[Repository],
    ) -> Result<ArtifactAvailableVersions, ResolveError> {
        let identifier = artifact.identifier();
        let required = artifact.artifact_type().repository_type();

        let eligible: Vec<&Repository> = repositories
            .iter()
            .filter(|repository| repository.is_eligible_for(required))
            .collect();

        if eligible.is_empty() {
            debug!("No {} repository eligible for {}", required, identifier);
            return Ok(ArtifactAvailableVersions::new(
                artifact.clone(),
                Vec::<String>::new(),
            )?);
        }

        if self.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled(identifier.clone()));
        }

        info!(
            "Resolving {} against {} repositories",
            identifier,
            eligible.len()
        );

        let fetches = eligible
            .iter()
            .map(|repository| self.fetch(identifier, repository));

        let versions: Vec<String> = if self.fail_fast {
            try_join_all(fetches)
                .await
                .map_err(|failure| single_failure(identifier, failure))?
                .into_iter()
                .flatten()
                .collect()
        } else {
            let mut versions = Vec::new();
            let mut failures = Vec::new();
            for result in join_all(fetches).await {
                match result {
                    Ok(found) => versions.extend(found),
                    Err(failure) => failures.push(failure),
                }
            }

            if failures
                .iter()
                .any(|failure| matches!(failure.error, RegistryError::Cancelled))
            {
                return Err(ResolveError::Cancelled(identifier.clone()));
            }

            if failures.len() == eligible.len() {
                return Err(ResolveError::AllRepositoriesFailed {
                    identifier: identifier.clone(),
                    failures,
                });
            }
            versions
        };

        let versions = sort_versions(versions.into_iter().filter(|v| !v.is_empty()).collect());
        Ok(ArtifactAvailableVersions::new(artifact.clone(), versions)?)
    }
}
