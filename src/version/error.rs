use std::fmt;

use thiserror::Error;

use crate::model::artifact::ArtifactIdentifier;
use crate::model::error::InvalidInputError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid metadata: {0}")]
    Metadata(#[from] quick_xml::DeError),

    #[error("Timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },

    #[error("Offline mode, repository {0} not queried")]
    Offline(String),

    #[error("Cancelled")]
    Cancelled,
}

/// A repository that could not be queried for an artifact
#[derive(Debug)]
pub struct RepositoryFailure {
    pub repository_id: String,
    pub error: RegistryError,
}

impl fmt::Display for RepositoryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.repository_id, self.error)
    }
}

/// Failure scoped to a single artifact
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No repository could be queried for {identifier}: {}", describe(.failures))]
    AllRepositoriesFailed {
        identifier: ArtifactIdentifier,
        failures: Vec<RepositoryFailure>,
    },

    #[error("Repository {} failed for {identifier}: {}", .failure.repository_id, .failure.error)]
    RepositoryFailed {
        identifier: ArtifactIdentifier,
        failure: RepositoryFailure,
    },

    #[error("Resolution of {0} was cancelled")]
    Cancelled(ArtifactIdentifier),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

fn describe(failures: &[RepositoryFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fatal error: the session needed to reach any repository could not be built
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to create the repository session HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid proxy {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
