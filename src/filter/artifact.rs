//! Artifact filters
//!
//! An [`ArtifactFilter`] decides twice: whether an artifact is checked at
//! all, then whether a recommended update of it is reported.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::model::artifact::Artifact;
use crate::model::error::{InvalidInputError, ensure_not_empty};

pub const WILDCARD_SINGLE: char = '?';
pub const WILDCARD_ANY: char = '*';

const SEPARATOR: char = ':';

pub trait ArtifactFilter: Send + Sync {
    /// Whether the artifact should be checked at all
    fn accept(&self, artifact: &Artifact) -> bool;

    /// Whether `update_version` should be reported for the artifact
    ///
    /// Fails with [`InvalidInputError`] when `update_version` is empty.
    fn accept_update(&self, artifact: &Artifact, update_version: &str)
    -> Result<bool, InvalidInputError>;
}

/// Accepts every artifact and update, used when no exclusion is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ArtifactFilter for AcceptAll {
    fn accept(&self, _artifact: &Artifact) -> bool {
        true
    }

    fn accept_update(
        &self,
        _artifact: &Artifact,
        update_version: &str,
    ) -> Result<bool, InvalidInputError> {
        ensure_not_empty("updateVersion", update_version)?;
        Ok(true)
    }
}

/// Rejects every artifact and update
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl ArtifactFilter for RejectAll {
    fn accept(&self, _artifact: &Artifact) -> bool {
        false
    }

    fn accept_update(
        &self,
        _artifact: &Artifact,
        update_version: &str,
    ) -> Result<bool, InvalidInputError> {
        ensure_not_empty("updateVersion", update_version)?;
        Ok(false)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactFilterError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("Invalid filter expression {expression:?}: expected groupId[:artifactId[:updateVersion]]")]
    InvalidExpression { expression: String },
}

/// Compiles a wildcard expression into an anchored, case-insensitive pattern
pub(crate) fn wildcard_pattern(expression: &str) -> Regex {
    let mut pattern = String::with_capacity(expression.len() + 2);
    pattern.push('^');
    let mut literal = String::new();
    for c in expression.chars() {
        match c {
            WILDCARD_SINGLE | WILDCARD_ANY => {
                pattern.push_str(&regex::escape(&literal));
                literal.clear();
                pattern.push_str(if c == WILDCARD_SINGLE { "." } else { ".*" });
            }
            _ => literal.push(c),
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern.push('$');

    // Escaped literals and wildcards always form a valid pattern
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .unwrap()
}

/// Matches artifacts by `?` and `*` wildcard expressions
///
/// The artifact and update version expressions are optional; when absent,
/// any artifact id or update version matches.
#[derive(Debug, Clone)]
pub struct WildcardArtifactFilter {
    group_id: Regex,
    artifact_id: Option<Regex>,
    update_version: Option<Regex>,
}

impl WildcardArtifactFilter {
    pub fn new(
        group_id: &str,
        artifact_id: Option<&str>,
        update_version: Option<&str>,
    ) -> Result<Self, InvalidInputError> {
        ensure_not_empty("groupIdExpression", group_id)?;
        if let Some(expression) = artifact_id {
            ensure_not_empty("artifactIdExpression", expression)?;
        }
        if let Some(expression) = update_version {
            ensure_not_empty("updateVersionExpression", expression)?;
        }
        Ok(Self {
            group_id: wildcard_pattern(group_id),
            artifact_id: artifact_id.map(wildcard_pattern),
            update_version: update_version.map(wildcard_pattern),
        })
    }

    /// Parses a `groupId[:artifactId[:updateVersion]]` expression
    pub fn parse(expression: &str) -> Result<Self, ArtifactFilterError> {
        let parts: Vec<&str> = expression.trim().split(SEPARATOR).collect();
        match parts[..] {
            [group_id] => Ok(Self::new(group_id, None, None)?),
            [group_id, artifact_id] => Ok(Self::new(group_id, Some(artifact_id), None)?),
            [group_id, artifact_id, update_version] => Ok(Self::new(
                group_id,
                Some(artifact_id),
                Some(update_version),
            )?),
            _ => Err(ArtifactFilterError::InvalidExpression {
                expression: expression.to_string(),
            }),
        }
    }
}

impl ArtifactFilter for WildcardArtifactFilter {
    fn accept(&self, artifact: &Artifact) -> bool {
        let identifier = artifact.identifier();
        self.group_id.is_match(identifier.group_id())
            && self
                .artifact_id
                .as_ref()
                .is_none_or(|pattern| pattern.is_match(identifier.artifact_id()))
    }

    fn accept_update(
        &self,
        artifact: &Artifact,
        update_version: &str,
    ) -> Result<bool, InvalidInputError> {
        ensure_not_empty("updateVersion", update_version)?;
        Ok(self.accept(artifact)
            && self
                .update_version
                .as_ref()
                .is_none_or(|pattern| pattern.is_match(update_version)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    All,
    Any,
    None,
}

/// Combines filters with an all, any or none match
#[derive(Clone)]
pub struct CompositeArtifactFilter {
    mode: Match,
    filters: Vec<Arc<dyn ArtifactFilter>>,
}

impl CompositeArtifactFilter {
    /// Accepts when every filter accepts
    pub fn all(filters: Vec<Arc<dyn ArtifactFilter>>) -> Result<Self, InvalidInputError> {
        Self::new(Match::All, filters)
    }

    /// Accepts when at least one filter accepts
    pub fn any(filters: Vec<Arc<dyn ArtifactFilter>>) -> Result<Self, InvalidInputError> {
        Self::new(Match::Any, filters)
    }

    /// Accepts when no filter accepts
    pub fn none(filters: Vec<Arc<dyn ArtifactFilter>>) -> Result<Self, InvalidInputError> {
        Self::new(Match::None, filters)
    }

    fn new(mode: Match, filters: Vec<Arc<dyn ArtifactFilter>>) -> Result<Self, InvalidInputError> {
        if filters.is_empty() {
            return Err(InvalidInputError::Empty("filters"));
        }
        Ok(Self { mode, filters })
    }

    fn combine<F>(&self, mut accepts: F) -> Result<bool, InvalidInputError>
    where
        F: FnMut(&dyn ArtifactFilter) -> Result<bool, InvalidInputError>,
    {
        for filter in &self.filters {
            let accepted = accepts(filter.as_ref())?;
            match (self.mode, accepted) {
                (Match::All, false) => return Ok(false),
                (Match::Any, true) => return Ok(true),
                (Match::None, true) => return Ok(false),
                _ => {}
            }
        }
        Ok(self.mode != Match::Any)
    }
}

impl ArtifactFilter for CompositeArtifactFilter {
    fn accept(&self, artifact: &Artifact) -> bool {
        self.combine(|filter| Ok(filter.accept(artifact)))
            .unwrap_or(false)
    }

    fn accept_update(
        &self,
        artifact: &Artifact,
        update_version: &str,
    ) -> Result<bool, InvalidInputError> {
        ensure_not_empty("updateVersion", update_version)?;
        self.combine(|filter| filter.accept_update(artifact, update_version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::ArtifactIdentifier;
    use crate::model::types::MavenArtifactType;
    use rstest::rstest;

    fn artifact(group_id: &str, artifact_id: &str) -> Artifact {
        Artifact::new(
            MavenArtifactType::Dependency,
            ArtifactIdentifier::new(group_id, artifact_id).unwrap(),
            Some("1.0.0".to_string()),
        )
        .unwrap()
    }

    fn shared(filter: impl ArtifactFilter + 'static) -> Arc<dyn ArtifactFilter> {
        Arc::new(filter)
    }

    #[test]
    fn accept_all_and_reject_all_are_opposite_bookends() {
        let artifact = artifact("foo", "bar");

        assert!(AcceptAll.accept(&artifact));
        assert_eq!(AcceptAll.accept_update(&artifact, "2.0.0"), Ok(true));
        assert!(!RejectAll.accept(&artifact));
        assert_eq!(RejectAll.accept_update(&artifact, "2.0.0"), Ok(false));
    }

    #[test]
    fn bookends_reject_empty_update_version() {
        let artifact = artifact("foo", "bar");

        assert_eq!(
            AcceptAll.accept_update(&artifact, ""),
            Err(InvalidInputError::Empty("updateVersion"))
        );
        assert_eq!(
            RejectAll.accept_update(&artifact, ""),
            Err(InvalidInputError::Empty("updateVersion"))
        );
    }

    #[rstest]
    #[case("foo", "foo", "bar", true)]
    #[case("FOO", "foo", "bar", true)]
    #[case("f?o", "foo", "bar", true)]
    #[case("f?o", "fooo", "bar", false)]
    #[case("f*", "fooo", "bar", true)]
    #[case("com.example", "comXexample", "bar", false)]
    #[case("foo:bar", "foo", "bar", true)]
    #[case("foo:baz", "foo", "bar", false)]
    #[case("*:b*", "foo", "bar", true)]
    #[case("foo:bar:2.*", "foo", "bar", true)]
    fn wildcard_accept_matches_identifier(
        #[case] expression: &str,
        #[case] group_id: &str,
        #[case] artifact_id: &str,
        #[case] expected: bool,
    ) {
        let filter = WildcardArtifactFilter::parse(expression).unwrap();
        assert_eq!(filter.accept(&artifact(group_id, artifact_id)), expected);
    }

    #[rstest]
    #[case("foo:bar", "3.0.0", true)]
    #[case("foo:bar:2.*", "2.1.0", true)]
    #[case("foo:bar:2.*", "3.0.0", false)]
    #[case("foo:bar:2.?.0", "2.1.0", true)]
    #[case("foo:bar:*-RC*", "2.0.0-rc1", true)]
    #[case("baz:bar:2.*", "2.1.0", false)]
    fn wildcard_accept_update_matches_version(
        #[case] expression: &str,
        #[case] update_version: &str,
        #[case] expected: bool,
    ) {
        let filter = WildcardArtifactFilter::parse(expression).unwrap();
        assert_eq!(
            filter.accept_update(&artifact("foo", "bar"), update_version),
            Ok(expected)
        );
    }

    #[rstest]
    #[case("")]
    #[case("foo:")]
    #[case("foo:bar:")]
    fn wildcard_parse_rejects_empty_parts(#[case] expression: &str) {
        assert!(matches!(
            WildcardArtifactFilter::parse(expression),
            Err(ArtifactFilterError::InvalidInput(_))
        ));
    }

    #[test]
    fn wildcard_parse_rejects_too_many_parts() {
        assert!(matches!(
            WildcardArtifactFilter::parse("a:b:c:d"),
            Err(ArtifactFilterError::InvalidExpression { .. })
        ));
    }

    #[test]
    fn composite_rejects_empty_filters() {
        assert_eq!(
            CompositeArtifactFilter::all(Vec::new()).err().map(|e| e.to_string()),
            Some("filters must not be empty".to_string())
        );
    }

    #[rstest]
    #[case(Match::All, true, true, true)]
    #[case(Match::All, true, false, false)]
    #[case(Match::Any, true, false, true)]
    #[case(Match::Any, false, false, false)]
    #[case(Match::None, false, false, true)]
    #[case(Match::None, false, true, false)]
    fn composite_combines_results(
        #[case] mode: Match,
        #[case] first: bool,
        #[case] second: bool,
        #[case] expected: bool,
    ) {
        let pick = |accepted: bool| if accepted { shared(AcceptAll) } else { shared(RejectAll) };
        let filter = CompositeArtifactFilter::new(mode, vec![pick(first), pick(second)]).unwrap();
        let artifact = artifact("foo", "bar");

        assert_eq!(filter.accept(&artifact), expected);
        assert_eq!(filter.accept_update(&artifact, "2.0.0"), Ok(expected));
    }

    #[test]
    fn composite_rejects_empty_update_version() {
        let filter = CompositeArtifactFilter::any(vec![shared(AcceptAll)]).unwrap();
        assert_eq!(
            filter.accept_update(&artifact("foo", "bar"), ""),
            Err(InvalidInputError::Empty("updateVersion"))
        );
    }
}
