//! Artifact and repository classification

use std::fmt;
use std::str::FromStr;

/// Kind of artifact a remote repository is expected to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryType {
    /// Regular library artifacts
    Normal,
    /// Build-tool plugin artifacts
    Plugin,
}

impl RepositoryType {
    /// Returns the string representation of the repository type
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryType::Normal => "NORMAL",
            RepositoryType::Plugin => "PLUGIN",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepositoryType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(RepositoryType::Normal),
            "PLUGIN" => Ok(RepositoryType::Plugin),
            _ => Err(UnknownTypeError(s.to_string())),
        }
    }
}

/// Error returned when a type name does not match any known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown type: {0}")]
pub struct UnknownTypeError(pub String);

/// Role of an artifact inside a Maven POM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MavenArtifactType {
    Parent,
    DependencyManagementDependency,
    Dependency,
    BuildExtension,
    BuildPluginManagementPlugin,
    BuildPluginManagementPluginDependency,
    BuildPlugin,
    BuildPluginDependency,
    ReportingPlugin,
    ProfileBuildPluginManagementPlugin,
    ProfileBuildPluginManagementPluginDependency,
    ProfileBuildPlugin,
    ProfileBuildPluginDependency,
    ProfileDependencyManagementDependency,
    ProfileDependency,
    ProfileReportingPlugin,
}

impl MavenArtifactType {
    pub const ALL: [MavenArtifactType; 16] = [
        MavenArtifactType::Parent,
        MavenArtifactType::DependencyManagementDependency,
        MavenArtifactType::Dependency,
        MavenArtifactType::BuildExtension,
        MavenArtifactType::BuildPluginManagementPlugin,
        MavenArtifactType::BuildPluginManagementPluginDependency,
        MavenArtifactType::BuildPlugin,
        MavenArtifactType::BuildPluginDependency,
        MavenArtifactType::ReportingPlugin,
        MavenArtifactType::ProfileBuildPluginManagementPlugin,
        MavenArtifactType::ProfileBuildPluginManagementPluginDependency,
        MavenArtifactType::ProfileBuildPlugin,
        MavenArtifactType::ProfileBuildPluginDependency,
        MavenArtifactType::ProfileDependencyManagementDependency,
        MavenArtifactType::ProfileDependency,
        MavenArtifactType::ProfileReportingPlugin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MavenArtifactType::Parent => "PARENT",
            MavenArtifactType::DependencyManagementDependency => "DEPENDENCY_MANAGEMENT_DEPENDENCY",
            MavenArtifactType::Dependency => "DEPENDENCY",
            MavenArtifactType::BuildExtension => "BUILD_EXTENSION",
            MavenArtifactType::BuildPluginManagementPlugin => "BUILD_PLUGIN_MANAGEMENT_PLUGIN",
            MavenArtifactType::BuildPluginManagementPluginDependency => {
                "BUILD_PLUGIN_MANAGEMENT_PLUGIN_DEPENDENCY"
            }
            MavenArtifactType::BuildPlugin => "BUILD_PLUGIN",
            MavenArtifactType::BuildPluginDependency => "BUILD_PLUGIN_DEPENDENCY",
            MavenArtifactType::ReportingPlugin => "REPORTING_PLUGIN",
            MavenArtifactType::ProfileBuildPluginManagementPlugin => {
                "PROFILE_BUILD_PLUGIN_MANAGEMENT_PLUGIN"
            }
            MavenArtifactType::ProfileBuildPluginManagementPluginDependency => {
                "PROFILE_BUILD_PLUGIN_MANAGEMENT_PLUGIN_DEPENDENCY"
            }
            MavenArtifactType::ProfileBuildPlugin => "PROFILE_BUILD_PLUGIN",
            MavenArtifactType::ProfileBuildPluginDependency => "PROFILE_BUILD_PLUGIN_DEPENDENCY",
            MavenArtifactType::ProfileDependencyManagementDependency => {
                "PROFILE_DEPENDENCY_MANAGEMENT_DEPENDENCY"
            }
            MavenArtifactType::ProfileDependency => "PROFILE_DEPENDENCY",
            MavenArtifactType::ProfileReportingPlugin => "PROFILE_REPORTING_PLUGIN",
        }
    }

    /// Plugin roles are served by plugin repositories, everything else by normal ones
    pub fn repository_type(&self) -> RepositoryType {
        match self {
            MavenArtifactType::BuildPluginManagementPlugin
            | MavenArtifactType::BuildPlugin
            | MavenArtifactType::ReportingPlugin
            | MavenArtifactType::ProfileBuildPluginManagementPlugin
            | MavenArtifactType::ProfileBuildPlugin
            | MavenArtifactType::ProfileReportingPlugin => RepositoryType::Plugin,
            _ => RepositoryType::Normal,
        }
    }
}

/// Gradle dependency configuration an artifact was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradleArtifactType {
    AnnotationProcessor,
    Api,
    Compile,
    CompileClasspath,
    CompileOnly,
    CompileOnlyApi,
    Implementation,
    Runtime,
    RuntimeClasspath,
    RuntimeOnly,
    TestAnnotationProcessor,
    TestCompile,
    TestCompileClasspath,
    TestCompileOnly,
    TestImplementation,
    TestRuntime,
    TestRuntimeClasspath,
    TestRuntimeOnly,
}

impl GradleArtifactType {
    pub const ALL: [GradleArtifactType; 18] = [
        GradleArtifactType::AnnotationProcessor,
        GradleArtifactType::Api,
        GradleArtifactType::Compile,
        GradleArtifactType::CompileClasspath,
        GradleArtifactType::CompileOnly,
        GradleArtifactType::CompileOnlyApi,
        GradleArtifactType::Implementation,
        GradleArtifactType::Runtime,
        GradleArtifactType::RuntimeClasspath,
        GradleArtifactType::RuntimeOnly,
        GradleArtifactType::TestAnnotationProcessor,
        GradleArtifactType::TestCompile,
        GradleArtifactType::TestCompileClasspath,
        GradleArtifactType::TestCompileOnly,
        GradleArtifactType::TestImplementation,
        GradleArtifactType::TestRuntime,
        GradleArtifactType::TestRuntimeClasspath,
        GradleArtifactType::TestRuntimeOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradleArtifactType::AnnotationProcessor => "ANNOTATION_PROCESSOR",
            GradleArtifactType::Api => "API",
            GradleArtifactType::Compile => "COMPILE",
            GradleArtifactType::CompileClasspath => "COMPILE_CLASSPATH",
            GradleArtifactType::CompileOnly => "COMPILE_ONLY",
            GradleArtifactType::CompileOnlyApi => "COMPILE_ONLY_API",
            GradleArtifactType::Implementation => "IMPLEMENTATION",
            GradleArtifactType::Runtime => "RUNTIME",
            GradleArtifactType::RuntimeClasspath => "RUNTIME_CLASSPATH",
            GradleArtifactType::RuntimeOnly => "RUNTIME_ONLY",
            GradleArtifactType::TestAnnotationProcessor => "TEST_ANNOTATION_PROCESSOR",
            GradleArtifactType::TestCompile => "TEST_COMPILE",
            GradleArtifactType::TestCompileClasspath => "TEST_COMPILE_CLASSPATH",
            GradleArtifactType::TestCompileOnly => "TEST_COMPILE_ONLY",
            GradleArtifactType::TestImplementation => "TEST_IMPLEMENTATION",
            GradleArtifactType::TestRuntime => "TEST_RUNTIME",
            GradleArtifactType::TestRuntimeClasspath => "TEST_RUNTIME_CLASSPATH",
            GradleArtifactType::TestRuntimeOnly => "TEST_RUNTIME_ONLY",
        }
    }

    /// Name of the configuration as written in a Gradle build script (e.g. `testImplementation`)
    pub fn dependencies_task_name(&self) -> String {
        let mut name = String::new();
        for (i, word) in self.as_str().split('_').enumerate() {
            let word = word.to_ascii_lowercase();
            if i == 0 {
                name.push_str(&word);
                continue;
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                name.push(first.to_ascii_uppercase());
                name.push_str(chars.as_str());
            }
        }
        name
    }

    /// Resolved classpath aggregates repeat artifacts declared elsewhere
    pub fn is_classpath(&self) -> bool {
        matches!(
            self,
            GradleArtifactType::CompileClasspath
                | GradleArtifactType::RuntimeClasspath
                | GradleArtifactType::TestCompileClasspath
                | GradleArtifactType::TestRuntimeClasspath
        )
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(
            self,
            GradleArtifactType::Compile
                | GradleArtifactType::Runtime
                | GradleArtifactType::TestCompile
                | GradleArtifactType::TestRuntime
        )
    }
}

/// Role of an artifact together with the build ecosystem that declared it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactType {
    Maven(MavenArtifactType),
    Gradle(GradleArtifactType),
}

impl ArtifactType {
    /// Repository type the artifact must be resolved against
    pub fn repository_type(&self) -> RepositoryType {
        match self {
            ArtifactType::Maven(maven) => maven.repository_type(),
            ArtifactType::Gradle(_) => RepositoryType::Normal,
        }
    }

    pub fn is_classpath(&self) -> bool {
        match self {
            ArtifactType::Maven(_) => false,
            ArtifactType::Gradle(gradle) => gradle.is_classpath(),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        match self {
            ArtifactType::Maven(_) => false,
            ArtifactType::Gradle(gradle) => gradle.is_deprecated(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Maven(maven) => maven.as_str(),
            ArtifactType::Gradle(gradle) => gradle.as_str(),
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MavenArtifactType> for ArtifactType {
    fn from(value: MavenArtifactType) -> Self {
        ArtifactType::Maven(value)
    }
}

impl From<GradleArtifactType> for ArtifactType {
    fn from(value: GradleArtifactType) -> Self {
        ArtifactType::Gradle(value)
    }
}

/// Parses `ecosystem:role`, e.g. `maven:build-plugin` or `gradle:testImplementation`
impl FromStr for ArtifactType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownTypeError(s.to_string());
        let (ecosystem, role) = s.split_once(':').ok_or_else(unknown)?;
        let role = normalize_role(role);

        match ecosystem.to_ascii_lowercase().as_str() {
            "maven" => MavenArtifactType::ALL
                .into_iter()
                .find(|t| normalize_role(t.as_str()) == role)
                .map(ArtifactType::Maven)
                .ok_or_else(unknown),
            "gradle" => GradleArtifactType::ALL
                .into_iter()
                .find(|t| normalize_role(t.as_str()) == role)
                .map(ArtifactType::Gradle)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

/// Drops separators and case so `build-plugin`, `BUILD_PLUGIN` and `buildPlugin` compare equal
fn normalize_role(role: &str) -> String {
    role.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
