//! Shared repository session
//!
//! Built once per run from [`Settings`] and shared read-only by every
//! concurrent resolution.

use std::time::Duration;

use crate::config::{Server, Settings};
use crate::model::repository::Repository;
use crate::version::error::SessionError;

const DEFAULT_USER_AGENT: &str = concat!("mvnchk/", env!("CARGO_PKG_VERSION"));

/// Slack added to the per-query timeout for the HTTP client timeout
const CLIENT_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// HTTP client timeout; outlasts `query_timeout` so an expired query is reported as a timeout
fn client_timeout(query_timeout: Duration) -> Duration {
    query_timeout.saturating_add(CLIENT_TIMEOUT_MARGIN)
}

/// Where a query for a repository is actually sent, after mirror selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub id: &'a str,
    pub url: &'a str,
}

pub struct MavenSession {
    client: reqwest::Client,
    settings: Settings,
}

impl MavenSession {
    /// Creates the HTTP client used by every repository query
    ///
    /// Fails with [`SessionError`] when the client or its proxy cannot be built,
    /// in which case no artifact can be resolved at all.
    pub fn new(settings: Settings, timeout: Duration) -> Result<Self, SessionError> {
        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(client_timeout(timeout));

        if let Some(url) = &settings.proxy {
            let proxy = reqwest::Proxy::all(url.as_str()).map_err(|source| SessionError::Proxy {
                url: url.clone(),
                source,
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(SessionError::Client)?;

        Ok(Self { client, settings })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn is_offline(&self) -> bool {
        self.settings.offline
    }

    /// Resolves the mirror, if any, serving `repository`
    pub fn endpoint<'a>(&'a self, repository: &'a Repository) -> Endpoint<'a> {
        self.settings
            .mirrors
            .iter()
            .find(|mirror| mirror.matches(repository.id()))
            .map(|mirror| Endpoint {
                id: &mirror.id,
                url: &mirror.url,
            })
            .unwrap_or(Endpoint {
                id: repository.id(),
                url: repository.url(),
            })
    }

    pub fn credentials(&self, endpoint_id: &str) -> Option<&Server> {
        self.settings
            .servers
            .iter()
            .find(|server| server.id == endpoint_id)
    }
}
