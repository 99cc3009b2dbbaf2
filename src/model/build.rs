//! Build files and the builds resolved from them

use std::fmt;
use std::path::{Path, PathBuf};

use crate::model::artifact::Artifact;
use crate::model::error::InvalidInputError;
use crate::model::repository::Repository;
use crate::model::types::UnknownTypeError;

/// Format of a build file, identifying the front end that produced a [`Build`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildFileType {
    Maven,
    GradleGroovy,
    GradleKotlin,
}

impl BuildFileType {
    pub const ALL: [BuildFileType; 3] = [
        BuildFileType::Maven,
        BuildFileType::GradleGroovy,
        BuildFileType::GradleKotlin,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            BuildFileType::Maven => "pom.xml",
            BuildFileType::GradleGroovy => "build.gradle",
            BuildFileType::GradleKotlin => "build.gradle.kts",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildFileType::Maven => "MAVEN",
            BuildFileType::GradleGroovy => "GRADLE_GROOVY",
            BuildFileType::GradleKotlin => "GRADLE_KOTLIN",
        }
    }

    /// Detects the build file type from a file name such as `pom.xml`
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|file_type| file_type.file_name() == file_name)
    }
}

impl std::str::FromStr for BuildFileType {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|file_type| file_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTypeError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildFile {
    file_type: BuildFileType,
    path: PathBuf,
}

impl BuildFile {
    pub fn new(file_type: BuildFileType, path: impl Into<PathBuf>) -> Result<Self, InvalidInputError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(InvalidInputError::Empty("path"));
        }
        Ok(Self { file_type, path })
    }

    pub fn file_type(&self) -> BuildFileType {
        self.file_type
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for BuildFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Repositories and artifacts declared by one build file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Build {
    file: BuildFile,
    repositories: Vec<Repository>,
    artifacts: Vec<Artifact>,
}

impl Build {
    pub fn new(file: BuildFile, repositories: Vec<Repository>, artifacts: Vec<Artifact>) -> Self {
        Self {
            file,
            repositories,
            artifacts,
        }
    }

    pub fn file(&self) -> &BuildFile {
        &self.file
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}
