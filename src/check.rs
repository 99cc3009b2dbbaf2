//! Update check orchestration
//!
//! Runs the resolver and the update selector over every artifact of a build.
//! Artifacts resolve concurrently up to the configured limit; a failure stays
//! attached to its artifact and never stops the others.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{CheckConfig, DEFAULT_CONCURRENCY, FETCH_STAGGER_DELAY_MS};
use crate::filter::artifact::ArtifactFilter;
use crate::filter::factories::{
    CompositeVersionFilterFactory, QualifierVersionFilterFactory, ReleaseVersionFilterFactory,
};
use crate::filter::version::{VersionFilterFactory, is_snapshot};
use crate::model::artifact::Artifact;
use crate::model::build::Build;
use crate::model::repository::Repository;
use crate::version::error::ResolveError;
use crate::version::resolver::AvailableVersionsResolver;
use crate::version::selector::select_update;
use crate::version::types::ArtifactUpdateVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Only recommend stable releases
    pub releases_only: bool,
    pub ignore_snapshots: bool,
    pub ignore_inherited: bool,
    /// Maximum number of artifacts resolved at once
    pub concurrency: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            releases_only: true,
            ignore_snapshots: false,
            ignore_inherited: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl From<&CheckConfig> for CheckOptions {
    fn from(config: &CheckConfig) -> Self {
        Self {
            releases_only: config.releases_only,
            ignore_snapshots: config.ignore_snapshots,
            ignore_inherited: config.ignore_inherited,
            concurrency: config.concurrency,
        }
    }
}

/// Outcome of checking one artifact
#[derive(Debug)]
pub struct ArtifactReport {
    pub artifact: Artifact,
    pub outcome: Result<Option<ArtifactUpdateVersion>, ResolveError>,
}

/// Outcome of checking every artifact of a build, in declaration order
#[derive(Debug)]
pub struct BuildReport {
    pub build: Build,
    pub artifacts: Vec<ArtifactReport>,
}

impl BuildReport {
    pub fn updates(&self) -> impl Iterator<Item = &ArtifactUpdateVersion> {
        self.artifacts
            .iter()
            .filter_map(|report| report.outcome.as_ref().ok().and_then(Option::as_ref))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Artifact, &ResolveError)> {
        self.artifacts
            .iter()
            .filter_map(|report| report.outcome.as_ref().err().map(|e| (&report.artifact, e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

pub struct CheckService {
    resolver: Arc<dyn AvailableVersionsResolver>,
    version_filter_factory: CompositeVersionFilterFactory,
    options: CheckOptions,
}

impl CheckService {
    pub fn new(resolver: Arc<dyn AvailableVersionsResolver>, options: CheckOptions) -> Self {
        let release = options
            .releases_only
            .then(|| Arc::new(ReleaseVersionFilterFactory::new()) as Arc<dyn VersionFilterFactory>);
        let version_filter_factory = CompositeVersionFilterFactory::from_parts(
            Arc::new(QualifierVersionFilterFactory::new()),
            release,
        );

        Self {
            resolver,
            version_filter_factory,
            options,
        }
    }

    /// Whether an artifact is update-checked at all
    pub fn is_checked(&self, artifact: &Artifact, artifact_filter: &dyn ArtifactFilter) -> bool {
        if artifact.artifact_type().is_classpath() {
            return false;
        }
        let Some(version) = artifact.version() else {
            return false;
        };
        if self.options.ignore_inherited && artifact.is_version_inherited() {
            debug!("Skipping {}: inherited version", artifact);
            return false;
        }
        if self.options.ignore_snapshots && is_snapshot(version) {
            debug!("Skipping {}: snapshot version", artifact);
            return false;
        }
        if !artifact_filter.accept(artifact) {
            debug!("Skipping {}: filtered out", artifact);
            return false;
        }
        true
    }

    /// Checks every artifact of `build` for an update
    ///
    /// Resolutions start with a short stagger to avoid bursts against the
    /// repositories. Reports keep the declaration order of the build.
    pub async fn check_build(
        &self,
        build: &Build,
        artifact_filter: &dyn ArtifactFilter,
    ) -> BuildReport {
        let checked: Vec<&Artifact> = build
            .artifacts()
            .iter()
            .filter(|artifact| self.is_checked(artifact, artifact_filter))
            .collect();

        info!(
            "Checking {} of {} artifacts of {}",
            checked.len(),
            build.artifacts().len(),
            build.file()
        );

        let concurrency = self.options.concurrency.max(1);
        let mut reports: Vec<(usize, ArtifactReport)> = stream::iter(checked.into_iter().enumerate())
            .map(|(i, artifact)| async move {
                let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * (i % concurrency) as u64);
                sleep(delay).await;
                let report = self
                    .check_artifact(artifact, build.repositories(), artifact_filter)
                    .await;
                (i, report)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        reports.sort_by_key(|(i, _)| *i);

        BuildReport {
            build: build.clone(),
            artifacts: reports.into_iter().map(|(_, report)| report).collect(),
        }
    }

    /// Checks builds one after the other, each with its own artifact filter
    pub async fn check_builds(
        &self,
        builds: &[(Build, Arc<dyn ArtifactFilter>)],
    ) -> Vec<BuildReport> {
        let mut reports = Vec::with_capacity(builds.len());
        for (build, artifact_filter) in builds {
            reports.push(self.check_build(build, artifact_filter.as_ref()).await);
        }
        reports
    }

    async fn check_artifact(
        &self,
        artifact: &Artifact,
        repositories: &[Repository],
        artifact_filter: &dyn ArtifactFilter,
    ) -> ArtifactReport {
        let outcome = self
            .find_update(artifact, repositories, artifact_filter)
            .await
            .inspect_err(|e| warn!("Failed to check {}: {}", artifact, e));

        ArtifactReport {
            artifact: artifact.clone(),
            outcome,
        }
    }

    async fn find_update(
        &self,
        artifact: &Artifact,
        repositories: &[Repository],
        artifact_filter: &dyn ArtifactFilter,
    ) -> Result<Option<ArtifactUpdateVersion>, ResolveError> {
        let Some(declared) = artifact.version() else {
            return Ok(None);
        };

        let available = self.resolver.resolve(artifact, repositories).await?;
        let version_filter = self.version_filter_factory.create(declared)?;
        let update = select_update(&available, version_filter.as_ref(), artifact_filter)?;

        if let Some(update) = &update {
            info!("{} can be updated to {}", artifact, update.update_version());
        }
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationHandle;
    use crate::filter::artifact::{AcceptAll, CompositeArtifactFilter, WildcardArtifactFilter};
    use crate::model::artifact::ArtifactIdentifier;
    use crate::model::build::{BuildFile, BuildFileType};
    use crate::model::types::{GradleArtifactType, MavenArtifactType, RepositoryType};
    use crate::version::error::RegistryError;
    use crate::version::registry::MockRepositoryMetadataService;
    use crate::version::resolver::RepositoryVersionsResolver;

    fn artifact(
        artifact_type: impl Into<crate::model::types::ArtifactType>,
        artifact_id: &str,
        version: Option<&str>,
    ) -> Artifact {
        Artifact::new(
            artifact_type,
            ArtifactIdentifier::new("com.example", artifact_id).unwrap(),
            version.map(str::to_string),
        )
        .unwrap()
    }

    fn build(artifacts: Vec<Artifact>) -> Build {
        Build::new(
            BuildFile::new(BuildFileType::Maven, "/project/pom.xml").unwrap(),
            vec![
                Repository::new(RepositoryType::Normal, "central", "https://repo.example.com")
                    .unwrap(),
            ],
            artifacts,
        )
    }

    fn service(metadata: MockRepositoryMetadataService, options: CheckOptions) -> CheckService {
        let resolver = RepositoryVersionsResolver::new(Arc::new(metadata));
        CheckService::new(Arc::new(resolver), options)
    }

    fn versions_by_artifact(identifier: &ArtifactIdentifier) -> Result<Vec<String>, RegistryError> {
        let versions: &[&str] = match identifier.artifact_id() {
            "lib" => &["1.0.0", "1.1.0", "2.0.0-rc1"],
            "plugin" => &["3.0.0", "3.1.0"],
            "current" => &["1.0.0"],
            "broken" => return Err(RegistryError::InvalidResponse("500".to_string())),
            _ => return Err(RegistryError::NotFound(identifier.to_string())),
        };
        Ok(versions.iter().map(|v| v.to_string()).collect())
    }

    fn update_of(report: &ArtifactReport) -> Option<&str> {
        report
            .outcome
            .as_ref()
            .unwrap()
            .as_ref()
            .map(|update| update.update_version())
    }

    #[tokio::test]
    async fn check_build_reports_each_checked_artifact_in_order() {
        let mut metadata = MockRepositoryMetadataService::new();
        metadata
            .expect_list_versions()
            .returning(|identifier, _| versions_by_artifact(identifier));

        let build = build(vec![
            artifact(MavenArtifactType::Dependency, "lib", Some("1.0.0")),
            artifact(MavenArtifactType::BuildPlugin, "plugin", Some("3.0.0")),
            artifact(MavenArtifactType::Dependency, "current", Some("1.0.0")),
            artifact(MavenArtifactType::Dependency, "broken", Some("1.0.0")),
        ]);

        let report = service(metadata, CheckOptions::default())
            .check_build(&build, &AcceptAll)
            .await;

        let ids: Vec<_> = report
            .artifacts
            .iter()
            .map(|r| r.artifact.identifier().artifact_id())
            .collect();
        assert_eq!(ids, vec!["lib", "plugin", "current", "broken"]);
        assert_eq!(update_of(&report.artifacts[0]), Some("1.1.0"));
        assert_eq!(update_of(&report.artifacts[1]), Some("3.1.0"));
        assert_eq!(update_of(&report.artifacts[2]), None);
        assert!(matches!(
            report.artifacts[3].outcome,
            Err(ResolveError::AllRepositoriesFailed { .. })
        ));

        assert_eq!(report.updates().count(), 2);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn check_build_offers_pre_releases_when_not_releases_only() {
        let mut metadata = MockRepositoryMetadataService::new();
        metadata
            .expect_list_versions()
            .returning(|identifier, _| versions_by_artifact(identifier));

        let build = build(vec![artifact(
            MavenArtifactType::Dependency,
            "lib",
            Some("1.0.0"),
        )]);
        let options = CheckOptions {
            releases_only: false,
            ..CheckOptions::default()
        };

        let report = service(metadata, options).check_build(&build, &AcceptAll).await;

        assert_eq!(update_of(&report.artifacts[0]), Some("2.0.0-rc1"));
    }

    #[tokio::test]
    async fn check_build_skips_unchecked_artifacts_without_queries() {
        let mut metadata = MockRepositoryMetadataService::new();
        metadata.expect_list_versions().times(0);

        let build = build(vec![
            artifact(GradleArtifactType::CompileClasspath, "lib", Some("1.0.0")),
            artifact(MavenArtifactType::Dependency, "lib", None),
            artifact(MavenArtifactType::Dependency, "snapshot", Some("1.0.0-SNAPSHOT")),
            artifact(MavenArtifactType::Dependency, "inherited", Some("1.0.0"))
                .with_version_inherited(true),
            artifact(MavenArtifactType::Dependency, "other", Some("1.0.0")),
        ]);
        let options = CheckOptions {
            ignore_snapshots: true,
            ignore_inherited: true,
            ..CheckOptions::default()
        };
        let other: Arc<dyn ArtifactFilter> =
            Arc::new(WildcardArtifactFilter::parse("com.example:other").unwrap());
        let filter = CompositeArtifactFilter::none(vec![other]).unwrap();

        let report = service(metadata, options).check_build(&build, &filter).await;

        assert!(report.artifacts.is_empty());
    }

    #[tokio::test]
    async fn check_build_with_cancelled_run_reports_cancellation() {
        let mut metadata = MockRepositoryMetadataService::new();
        metadata.expect_list_versions().times(0);

        let handle = CancellationHandle::new();
        handle.cancel();
        let resolver =
            RepositoryVersionsResolver::new(Arc::new(metadata)).with_cancellation(handle.token());
        let service = CheckService::new(Arc::new(resolver), CheckOptions::default());

        let build = build(vec![artifact(
            MavenArtifactType::Dependency,
            "lib",
            Some("1.0.0"),
        )]);
        let report = service.check_build(&build, &AcceptAll).await;

        assert!(matches!(
            report.artifacts[0].outcome,
            Err(ResolveError::Cancelled(_))
        ));
    }

    #[tokio::test]
    async fn check_builds_uses_each_build_filter() {
        let mut metadata = MockRepositoryMetadataService::new();
        metadata
            .expect_list_versions()
            .returning(|identifier, _| versions_by_artifact(identifier));

        let lib = build(vec![artifact(
            MavenArtifactType::Dependency,
            "lib",
            Some("1.0.0"),
        )]);
        let builds: Vec<(Build, Arc<dyn ArtifactFilter>)> = vec![
            (lib.clone(), Arc::new(AcceptAll)),
            (
                lib,
                Arc::new(WildcardArtifactFilter::parse("com.example:lib:9.*").unwrap()),
            ),
        ];

        let reports = service(metadata, CheckOptions::default())
            .check_builds(&builds)
            .await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].updates().count(), 1);
        assert_eq!(reports[1].updates().count(), 0);
    }

    #[test]
    fn check_options_from_config() {
        let config = CheckConfig {
            releases_only: false,
            concurrency: 2,
            ..CheckConfig::default()
        };

        assert_eq!(
            CheckOptions::from(&config),
            CheckOptions {
                releases_only: false,
                ignore_snapshots: false,
                ignore_inherited: false,
                concurrency: 2,
            }
        );
    }
}
