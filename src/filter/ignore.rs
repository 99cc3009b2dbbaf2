//! Ignore file parser
//!
//! One rule per line, `#` starting a comment:
//!
//! ```text
//! # never check this artifact
//! com.google.guava:guava
//! # skip pre-release updates of this one
//! org.junit.jupiter:junit-jupiter:*-M?
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::filter::artifact::{ArtifactFilter, wildcard_pattern};
use crate::model::artifact::{Artifact, ArtifactIdentifier};
use crate::model::error::{InvalidInputError, ensure_not_empty};

const COMMENT_START: char = '#';
const SEPARATOR: char = ':';

#[derive(Debug, Error)]
pub enum ArtifactFilterParseError {
    #[error("{reason}: {line:?} (at line {line_number}{})", describe_path(.path))]
    Syntax {
        reason: &'static str,
        line: String,
        line_number: usize,
        path: Option<PathBuf>,
    },

    #[error("Failed to read ignore file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" of the {} file", path.display()))
        .unwrap_or_default()
}

impl ArtifactFilterParseError {
    fn syntax(reason: &'static str, line: &str, line_number: usize) -> Self {
        Self::Syntax {
            reason,
            line: line.to_string(),
            line_number,
            path: None,
        }
    }

    fn with_path(self, file: &Path) -> Self {
        match self {
            Self::Syntax {
                reason,
                line,
                line_number,
                ..
            } => Self::Syntax {
                reason,
                line,
                line_number,
                path: Some(file.to_path_buf()),
            },
            Self::Io { source, .. } => Self::Io {
                path: file.to_path_buf(),
                source,
            },
        }
    }
}

/// Exclusion rules read from an ignore file
///
/// `groupId:artifactId` lines exclude the artifact from checks;
/// `groupId:artifactId:versionExpression` lines only exclude the update
/// versions matching the `?`/`*` expression.
#[derive(Debug, Default, Clone)]
pub struct IgnoreRules {
    identifiers: IndexSet<ArtifactIdentifier>,
    identifier_versions: IndexMap<ArtifactIdentifier, Vec<Regex>>,
}

impl IgnoreRules {
    pub fn parse_file(path: &Path) -> Result<Self, ArtifactFilterParseError> {
        info!("Parsing the {} ignore file", path.display());
        let file = File::open(path).map_err(|source| ArtifactFilterParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file)).map_err(|e| e.with_path(path))
    }

    /// Parses an ignore file if it exists
    pub fn parse_optional(path: &Path) -> Result<Option<Self>, ArtifactFilterParseError> {
        if !path.is_file() {
            debug!("No ignore file at {}", path.display());
            return Ok(None);
        }
        Self::parse_file(path).map(Some)
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<Self, ArtifactFilterParseError> {
        let mut rules = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| ArtifactFilterParseError::Io {
                path: PathBuf::new(),
                source,
            })?;
            let line = line
                .split_once(COMMENT_START)
                .map_or(line.as_str(), |(before, _)| before)
                .trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(SEPARATOR).collect();
            let (group_id, artifact_id, version_expression) = match parts[..] {
                [group_id, artifact_id] => (group_id, artifact_id, None),
                [group_id, artifact_id, version] => (group_id, artifact_id, Some(version)),
                _ => {
                    return Err(ArtifactFilterParseError::syntax(
                        "Unexpected format",
                        line,
                        line_number,
                    ));
                }
            };
            if group_id.is_empty() {
                return Err(ArtifactFilterParseError::syntax(
                    "Unexpected format, empty groupId",
                    line,
                    line_number,
                ));
            }
            if artifact_id.is_empty() {
                return Err(ArtifactFilterParseError::syntax(
                    "Unexpected format, empty artifactId",
                    line,
                    line_number,
                ));
            }

            let identifier = ArtifactIdentifier::new(group_id, artifact_id).map_err(|_| {
                ArtifactFilterParseError::syntax("Unexpected format", line, line_number)
            })?;

            match version_expression {
                None => {
                    debug!("Ignoring the {} artifact", identifier);
                    rules.identifiers.insert(identifier);
                }
                Some("") => {
                    return Err(ArtifactFilterParseError::syntax(
                        "Unexpected format, empty version expression",
                        line,
                        line_number,
                    ));
                }
                Some(expression) => {
                    debug!(
                        "Ignoring the {} artifact with {} version expression",
                        identifier, expression
                    );
                    rules
                        .identifier_versions
                        .entry(identifier)
                        .or_default()
                        .push(wildcard_pattern(expression));
                }
            }
        }

        Ok(rules)
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty() && self.identifier_versions.is_empty()
    }
}

impl ArtifactFilter for IgnoreRules {
    fn accept(&self, artifact: &Artifact) -> bool {
        !self.identifiers.contains(artifact.identifier())
    }

    fn accept_update(
        &self,
        artifact: &Artifact,
        update_version: &str,
    ) -> Result<bool, InvalidInputError> {
        ensure_not_empty("updateVersion", update_version)?;
        Ok(self
            .identifier_versions
            .get(artifact.identifier())
            .is_none_or(|patterns| !patterns.iter().any(|p| p.is_match(update_version))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::MavenArtifactType;
    use rstest::rstest;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn artifact(group_id: &str, artifact_id: &str) -> Artifact {
        Artifact::new(
            MavenArtifactType::Dependency,
            ArtifactIdentifier::new(group_id, artifact_id).unwrap(),
            Some("1.0.0".to_string()),
        )
        .unwrap()
    }

    fn parse(content: &str) -> Result<IgnoreRules, ArtifactFilterParseError> {
        IgnoreRules::parse(Cursor::new(content))
    }

    const CONTENT: &str = "\
# Comment
foo:bar

foo:baz:2.*   # trailing comment
foo:baz:*-rc?
";

    #[test]
    fn parse_empty_content_accepts_everything() {
        let rules = parse("# nothing\n\n").unwrap();

        assert!(rules.is_empty());
        assert!(rules.accept(&artifact("foo", "bar")));
        assert_eq!(rules.accept_update(&artifact("foo", "bar"), "2.0.0"), Ok(true));
    }

    #[rstest]
    #[case("foo", "bar", false)]
    #[case("foo", "baz", true)]
    #[case("FOO", "bar", true)]
    #[case("foo", "qux", true)]
    fn accept_excludes_identifier_rules(
        #[case] group_id: &str,
        #[case] artifact_id: &str,
        #[case] expected: bool,
    ) {
        let rules = parse(CONTENT).unwrap();
        assert_eq!(rules.accept(&artifact(group_id, artifact_id)), expected);
    }

    #[rstest]
    #[case("2.1.0", false)]
    #[case("3.0.0-RC1", false)]
    #[case("3.0.0", true)]
    #[case("3.0.0-rc12", true)]
    fn accept_update_excludes_matching_versions(#[case] version: &str, #[case] expected: bool) {
        let rules = parse(CONTENT).unwrap();
        assert_eq!(
            rules.accept_update(&artifact("foo", "baz"), version),
            Ok(expected)
        );
    }

    #[test]
    fn accept_update_rejects_empty_version() {
        let rules = parse(CONTENT).unwrap();
        assert_eq!(
            rules.accept_update(&artifact("foo", "baz"), ""),
            Err(InvalidInputError::Empty("updateVersion"))
        );
    }

    #[rstest]
    #[case("foo", "Unexpected format")]
    #[case("foo:bar:baz:qux", "Unexpected format")]
    #[case(":bar", "Unexpected format, empty groupId")]
    #[case("foo:", "Unexpected format, empty artifactId")]
    #[case("foo:bar:", "Unexpected format, empty version expression")]
    fn parse_rejects_malformed_lines(#[case] line: &str, #[case] expected_reason: &str) {
        let error = parse(&format!("# header\nfoo:bar\n{line}\n")).unwrap_err();

        match error {
            ArtifactFilterParseError::Syntax {
                reason,
                line: actual,
                line_number,
                path,
            } => {
                assert_eq!(reason, expected_reason);
                assert_eq!(actual, line);
                assert_eq!(line_number, 3);
                assert!(path.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_file_reports_path_in_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "foo:bar").unwrap();
        writeln!(file, "invalid").unwrap();

        let error = IgnoreRules::parse_file(file.path()).unwrap_err();

        assert!(matches!(
            &error,
            ArtifactFilterParseError::Syntax { line_number: 2, path: Some(path), .. } if path == file.path()
        ));
        assert_eq!(
            error.to_string(),
            format!(
                "Unexpected format: \"invalid\" (at line 2 of the {} file)",
                file.path().display()
            )
        );
    }

    #[test]
    fn parse_optional_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = IgnoreRules::parse_optional(&dir.path().join(".mvnchk-ignore")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn parse_optional_reads_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "foo:bar").unwrap();

        let rules = IgnoreRules::parse_optional(file.path()).unwrap().unwrap();

        assert!(!rules.accept(&artifact("foo", "bar")));
    }
}
