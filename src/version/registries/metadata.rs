//! Version list of a `maven-metadata.xml` document
//!
//! Only `versioning/versions/version` is read; every other element is skipped.

use quick_xml::de::from_str;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MavenMetadata {
    #[serde(default)]
    versioning: Option<Versioning>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
struct Versioning {
    #[serde(default)]
    versions: Versions,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
struct Versions {
    #[serde(default, rename = "version")]
    items: Vec<String>,
}

impl MavenMetadata {
    /// Versions in document order, empty without a `versioning` section
    pub fn versions(&self) -> &[String] {
        self.versioning
            .as_ref()
            .map(|versioning| versioning.versions.items.as_slice())
            .unwrap_or_default()
    }
}

pub fn parse_metadata(xml: &str) -> Result<MavenMetadata, quick_xml::DeError> {
    from_str(xml)
}
