use std::fmt;

use crate::model::error::{InvalidInputError, ensure_not_empty};
use crate::model::types::RepositoryType;

/// Remote repository declared by a build
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    repository_type: RepositoryType,
    id: String,
    url: String,
}

impl Repository {
    pub fn new(
        repository_type: RepositoryType,
        id: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, InvalidInputError> {
        let id = id.into();
        let url = url.into();
        ensure_not_empty("id", &id)?;
        ensure_not_empty("url", &url)?;
        Ok(Self {
            repository_type,
            id,
            url,
        })
    }

    pub fn repository_type(&self) -> RepositoryType {
        self.repository_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether artifacts requiring `required` may be looked up in this repository
    ///
    /// Plugins resolve from every repository, other artifacts only from normal ones.
    pub fn is_eligible_for(&self, required: RepositoryType) -> bool {
        required == RepositoryType::Plugin || self.repository_type == RepositoryType::Normal
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}
