//! Identity and entity model
//! - error.rs: Invalid input error shared by every constructor and filter
//! - types.rs: Artifact types (Maven roles, Gradle configurations) and repository types
//! - artifact.rs: Artifact identifier and artifact
//! - repository.rs: Remote repository
//! - build.rs: Build file and build

pub mod artifact;
pub mod build;
pub mod error;
pub mod repository;
pub mod types;

pub use artifact::{Artifact, ArtifactIdentifier};
pub use build::{Build, BuildFile, BuildFileType};
pub use error::InvalidInputError;
pub use repository::Repository;
pub use types::{
    ArtifactType, GradleArtifactType, MavenArtifactType, RepositoryType, UnknownTypeError,
};
