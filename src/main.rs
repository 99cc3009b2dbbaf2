use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use mvnchk::cancel::CancellationHandle;
use mvnchk::check::{BuildReport, CheckOptions, CheckService};
use mvnchk::config::{
    CheckConfig, LOG_ENV, build_ignore_file, default_config_path, load_config, user_ignore_file,
};
use mvnchk::filter::{ArtifactFilter, IgnoreRules, WildcardArtifactFilter, effective_filter};
use mvnchk::manifest::load_build;
use mvnchk::model::build::Build;
use mvnchk::version::registries::MavenMetadataService;
use mvnchk::version::resolver::RepositoryVersionsResolver;
use mvnchk::version::session::MavenSession;

#[derive(Parser, Debug)]
#[command(name = "mvnchk")]
#[command(version, about = "Check for artifact updates of Maven and Gradle builds")]
struct Cli {
    /// Build manifests to check
    #[arg(required = true, value_name = "MANIFEST")]
    manifests: Vec<PathBuf>,

    /// Configuration file, defaults to the user config file when present
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only check artifacts matching `groupId[:artifactId[:updateVersion]]`
    #[arg(long = "filter", value_name = "EXPR")]
    filters: Vec<String>,

    /// Skip artifacts whose version is a snapshot
    #[arg(long)]
    ignore_snapshots: bool,

    /// Skip artifacts whose version is inherited
    #[arg(long)]
    ignore_inherited: bool,

    /// Also recommend alpha, beta, milestone and release candidate versions
    #[arg(long)]
    allow_prereleases: bool,

    /// Maximum number of artifacts resolved at once
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-repository query timeout in milliseconds
    #[arg(long, value_name = "N")]
    timeout_ms: Option<u64>,

    /// Fail an artifact as soon as one of its repositories fails
    #[arg(long)]
    fail_fast: bool,

    /// Only show builds with at least one artifact update
    #[arg(long)]
    short: bool,

    /// Log debug messages to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut CheckConfig) {
        config.filters.extend(self.filters.iter().cloned());
        config.ignore_snapshots |= self.ignore_snapshots;
        config.ignore_inherited |= self.ignore_inherited;
        config.fail_fast |= self.fail_fast;
        if self.allow_prereleases {
            config.releases_only = false;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guards = init_logging(cli.verbose, cli.log_file.as_deref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

/// Logs to stderr, filtered by `MVNCHK_LOG`, and optionally to a JSON file
fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<Vec<WorkerGuard>> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let (stderr, stderr_guard) = tracing_appender::non_blocking(io::stderr());
    let mut guards = vec![stderr_guard];

    let file_layer = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file: {}", path.display()))?;
            let directory = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
            guards.push(guard);
            Some(fmt::layer().json().with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr).with_target(false))
        .with(file_layer)
        .try_init()?;

    Ok(guards)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let path = default_config_path();
            if path.is_file() {
                load_config(&path)?
            } else {
                CheckConfig::default()
            }
        }
    };
    cli.apply(&mut config);

    let timeout = Duration::from_millis(config.timeout_ms);
    let session = MavenSession::new(config.settings.clone(), timeout)
        .context("Failed to initialize the repository session")?;

    let cancellation = CancellationHandle::new();
    let resolver = RepositoryVersionsResolver::new(Arc::new(MavenMetadataService::new(
        Arc::new(session),
    )))
    .with_timeout(timeout)
    .with_fail_fast(config.fail_fast)
    .with_cancellation(cancellation.token());
    let service = CheckService::new(Arc::new(resolver), CheckOptions::from(&config));

    let builds = load_builds(&cli.manifests, &config.filters)?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending queries");
            cancellation.cancel();
        }
    });

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} build file(s) found, checking for artifact updates",
        builds.len()
    )?;
    writeln!(out)?;

    let reports = service.check_builds(&builds).await;
    render(&mut out, &reports, cli.short)?;

    if reports.iter().any(BuildReport::has_failures) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads every manifest together with its effective artifact filter
fn load_builds(
    manifests: &[PathBuf],
    filters: &[String],
) -> anyhow::Result<Vec<(Build, Arc<dyn ArtifactFilter>)>> {
    let expressions = filters
        .iter()
        .map(|expression| {
            WildcardArtifactFilter::parse(expression)
                .map(|filter| Arc::new(filter) as Arc<dyn ArtifactFilter>)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut user_rules: Vec<Arc<dyn ArtifactFilter>> = Vec::new();
    if let Some(path) = user_ignore_file()
        && let Some(rules) = IgnoreRules::parse_optional(&path)?
    {
        user_rules.push(Arc::new(rules));
    }

    let mut builds = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        let build = load_build(manifest)?;
        info!("Loaded {} from {}", build.file(), manifest.display());

        let mut rules = user_rules.clone();
        if let Some(build_rules) = IgnoreRules::parse_optional(&build_ignore_file(build.file().path()))? {
            rules.push(Arc::new(build_rules));
        }

        let filter = effective_filter(&rules, &expressions)?;
        builds.push((build, filter));
    }
    Ok(builds)
}

fn render(out: &mut impl Write, reports: &[BuildReport], short: bool) -> io::Result<()> {
    let mut updates_count = 0;

    for report in reports {
        let updates: Vec<_> = report.updates().collect();
        let failures: Vec<_> = report.failures().collect();
        let path = report.build.file().path().display();

        if updates.is_empty() && failures.is_empty() {
            if !short {
                writeln!(out, "{}", path)?;
                writeln!(out, "No artifact update available")?;
                writeln!(out)?;
            }
            continue;
        }

        writeln!(out, "{}", path)?;
        for update in &updates {
            let artifact = update.artifact();
            let version = artifact.version().unwrap_or_default();
            let version = if artifact.is_version_inherited() {
                format!("({})", version)
            } else {
                version.to_string()
            };
            writeln!(
                out,
                "[{}] {} {} -> {}",
                artifact.artifact_type().as_str().replace('_', " "),
                artifact.identifier(),
                version,
                update.update_version()
            )?;
        }
        for (artifact, error) in &failures {
            writeln!(out, "{}: {}", artifact.identifier(), error)?;
        }
        if !updates.is_empty() {
            writeln!(out, "{} artifact update(s) available", updates.len())?;
        }
        writeln!(out)?;
        updates_count += updates.len();
    }

    if updates_count == 0 {
        writeln!(
            out,
            "{} build file(s) checked, no artifact update available",
            reports.len()
        )
    } else {
        writeln!(
            out,
            "{} build file(s) checked, {} artifact update(s) available",
            reports.len(),
            updates_count
        )
    }
}
