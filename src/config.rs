use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for a single repository metadata query in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Delay between starting each artifact resolution to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

// =============================================================================
// Run-related constants
// =============================================================================

/// Maximum number of artifacts resolved at the same time
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Name of the ignore file looked up in the home directory and next to each build file
pub const IGNORE_FILE_NAME: &str = ".mvnchk-ignore";

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "MVNCHK_LOG";

/// Check run configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    /// Only recommend stable releases
    pub releases_only: bool,
    /// Skip artifacts whose declared version is a snapshot
    pub ignore_snapshots: bool,
    /// Skip artifacts whose version is inherited from a parent build
    pub ignore_inherited: bool,
    pub concurrency: usize,
    /// Per-repository query timeout in milliseconds
    pub timeout_ms: u64,
    /// Fail an artifact as soon as one of its repositories fails
    pub fail_fast: bool,
    /// `groupId[:artifactId[:updateVersion]]` expressions restricting the checked artifacts
    pub filters: Vec<String>,
    pub settings: Settings,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            releases_only: true,
            ignore_snapshots: false,
            ignore_inherited: false,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: FETCH_TIMEOUT_MS,
            fail_fast: false,
            filters: Vec::new(),
            settings: Settings::default(),
        }
    }
}

/// Repository access settings consumed by the session
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub offline: bool,
    pub user_agent: Option<String>,
    /// Proxy URL applied to every request
    pub proxy: Option<String>,
    pub servers: Vec<Server>,
    pub mirrors: Vec<Mirror>,
}

/// Credentials for the repository with the same id
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Repository redirected to another URL
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mirror {
    pub id: String,
    pub url: String,
    /// `*`, `external:*` or a comma-separated list of repository ids, `!id` excluding one
    pub mirror_of: String,
}

impl Mirror {
    pub fn matches(&self, repository_id: &str) -> bool {
        let patterns: Vec<&str> = self.mirror_of.split(',').map(str::trim).collect();
        if patterns
            .iter()
            .any(|pattern| pattern.strip_prefix('!') == Some(repository_id))
        {
            return false;
        }
        patterns
            .iter()
            .any(|pattern| matches!(*pattern, "*" | "external:*") || *pattern == repository_id)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads a JSON config file, missing fields taking their defaults
pub fn load_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the path to the default config file.
/// Uses $XDG_CONFIG_HOME/mvnchk/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/mvnchk/config.json,
/// or ./mvnchk/config.json if neither is available.
pub fn default_config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir()).join("config.json")
}

/// Returns the path to the ignore file in the user home directory.
pub fn user_ignore_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(IGNORE_FILE_NAME))
}

/// Returns the path to the ignore file next to a build file.
pub fn build_ignore_file(build_file: &Path) -> PathBuf {
    build_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(IGNORE_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("mvnchk")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn check_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<CheckConfig>(json!({
            "releasesOnly": false,
            "timeoutMs": 1000
        }))
        .unwrap();

        assert!(!result.releases_only);
        assert_eq!(result.timeout_ms, 1000);
        assert_eq!(result.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(result.settings, Settings::default());
    }

    #[test]
    fn check_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<CheckConfig>(json!({
            "releasesOnly": true,
            "ignoreSnapshots": true,
            "ignoreInherited": true,
            "concurrency": 2,
            "timeoutMs": 5000,
            "failFast": true,
            "filters": ["org.apache.*"],
            "settings": {
                "offline": true,
                "userAgent": "test-agent",
                "proxy": "http://proxy:3128",
                "servers": [{ "id": "internal", "username": "user", "password": "secret" }],
                "mirrors": [{ "id": "corp", "url": "https://mirror/maven2", "mirrorOf": "*" }]
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            CheckConfig {
                releases_only: true,
                ignore_snapshots: true,
                ignore_inherited: true,
                concurrency: 2,
                timeout_ms: 5000,
                fail_fast: true,
                filters: vec!["org.apache.*".to_string()],
                settings: Settings {
                    offline: true,
                    user_agent: Some("test-agent".to_string()),
                    proxy: Some("http://proxy:3128".to_string()),
                    servers: vec![Server {
                        id: "internal".to_string(),
                        username: "user".to_string(),
                        password: Some("secret".to_string()),
                    }],
                    mirrors: vec![Mirror {
                        id: "corp".to_string(),
                        url: "https://mirror/maven2".to_string(),
                        mirror_of: "*".to_string(),
                    }],
                },
            }
        );
    }

    #[rstest]
    #[case("*", "central", true)]
    #[case("external:*", "central", true)]
    #[case("central", "central", true)]
    #[case("central,jcenter", "jcenter", true)]
    #[case("central", "jcenter", false)]
    #[case("*,!internal", "internal", false)]
    #[case("*,!internal", "central", true)]
    fn mirror_matches_returns_expected(
        #[case] mirror_of: &str,
        #[case] repository_id: &str,
        #[case] expected: bool,
    ) {
        let mirror = Mirror {
            id: "mirror".to_string(),
            url: "https://mirror/maven2".to_string(),
            mirror_of: mirror_of.to_string(),
        };
        assert_eq!(mirror.matches(repository_id), expected);
    }

    #[test]
    fn load_config_reads_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "concurrency": 3 }}"#).unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.concurrency, 3);
        assert!(config.releases_only);
    }

    #[test]
    fn load_config_reports_parse_errors_with_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let error = load_config(file.path()).unwrap_err();

        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn build_ignore_file_is_a_sibling_of_the_build_file() {
        assert_eq!(
            build_ignore_file(Path::new("/project/module/pom.xml")),
            PathBuf::from("/project/module/.mvnchk-ignore")
        );
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/mvnchk"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/mvnchk"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./mvnchk"));
    }
}
