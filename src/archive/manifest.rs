//! The `.chubconfig` manifest
//!
//! Lists everything in the archive. It contains no timestamps and no
//! absolute paths, so identical inputs give an identical manifest.

use serde::{Deserialize, Serialize};

use crate::config::MetadataEntry;
use crate::error::Result;

/// Itemized contents of a chub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChubManifest {
    /// Distribution name of the main wheel
    pub name: String,
    /// Version of the main wheel
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entrypoint_args: Vec<String>,
    /// Wheels in archive order
    pub wheels: Vec<ManifestWheel>,
    #[serde(default)]
    pub scripts: ManifestScripts,
    /// Archive paths of included files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestWheel {
    /// Archive path under `libs/`
    pub file: String,
    pub name: String,
    pub version: String,
    /// `blake3:<hex>`
    pub hash: String,
    /// Set on the main wheel only
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary: bool,
}

/// Archive paths of install scripts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestScripts {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post: Vec<String>,
}

impl ChubManifest {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    #[cfg(test)]
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The wheel flagged as primary
    pub fn primary_wheel(&self) -> Option<&ManifestWheel> {
        self.wheels.iter().find(|w| w.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChubManifest {
        ChubManifest {
            name: "app".to_string(),
            version: "1.0".to_string(),
            entrypoint: Some("app.cli:main".to_string()),
            entrypoint_args: vec![],
            wheels: vec![
                ManifestWheel {
                    file: "libs/app-1.0-py3-none-any.whl".to_string(),
                    name: "app".to_string(),
                    version: "1.0".to_string(),
                    hash: "blake3:00".to_string(),
                    primary: true,
                },
                ManifestWheel {
                    file: "libs/dep-2.0-py3-none-any.whl".to_string(),
                    name: "dep".to_string(),
                    version: "2.0".to_string(),
                    hash: "blake3:11".to_string(),
                    primary: false,
                },
            ],
            scripts: ManifestScripts {
                pre: vec!["scripts/pre/setup.sh".to_string()],
                post: vec![],
            },
            includes: vec![],
            metadata: vec![MetadataEntry::new("k", "1"), MetadataEntry::new("k", "2")],
        }
    }

    #[test]
    fn test_yaml_layout() {
        let yaml = sample().to_yaml().unwrap();
        assert!(yaml.starts_with("name: app\n"));
        assert!(yaml.contains("primary: true"));
        assert!(!yaml.contains("primary: false"));
        assert!(!yaml.contains("includes"));
        assert!(!yaml.contains("post:"));
        assert_eq!(ChubManifest::from_yaml(&yaml).unwrap(), sample());
    }

    #[test]
    fn test_primary_wheel() {
        assert_eq!(sample().primary_wheel().unwrap().name, "app");
    }
}
