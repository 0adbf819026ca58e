//! Manifest schema for plugin bundles.
//!
//! The manifest describes a plugin's identity, target platform, runtime
//! requirement, and the files that make up its bundle. It lives at
//! `content/metadata.json` inside a plugin source tree and, stamped with
//! build metadata, at the same path inside the packaged archive.

use crate::minify::strip_comments;
use crate::{BUNDLE_EXTENSION, BUNDLE_FORMAT, CHECKSUM_EXTENSION, METADATA_PATH, ManifestError, ManifestResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Kind of plugin contained in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    /// Script-based plugin; requires an entry point and an icon.
    Scripted,
    /// Precompiled plugin identified by its signature.
    Native,
}

/// A plugin author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// The file lists making up a bundle's payload, relative to `content/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleContents {
    /// Main script, loaded first by the host.
    #[serde(default)]
    pub entry_point: String,

    /// Plugin icon shown in listings.
    #[serde(default)]
    pub icon: String,

    /// Additional scripts, loaded in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,

    /// Non-code resources, packaged in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

/// Plugin bundle manifest.
///
/// Author-supplied fields are read from the source tree; `bundleFormat`,
/// `timestamp` and `revision` are stamped during loading/packaging, and
/// `bundleId` is assigned when the bundle is published to a registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Unique identifier for the plugin family (e.g. "spotify-resolver").
    pub plugin_id: String,

    /// Human-readable plugin name.
    pub display_name: String,

    /// Dotted-numeric plugin version.
    pub version: String,

    /// Short description.
    pub description: String,

    /// Bundle kind.
    pub bundle_type: BundleType,

    /// Target platform; empty or `"any"` means platform-independent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub platform: String,

    /// Minimum host runtime version able to load this bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_runtime_version: Option<String>,

    /// License identifier (e.g. "MIT"). Missing license is a warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,

    /// Deprecated flat author name, superseded by `authors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Deprecated flat author email, superseded by `authors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Capabilities advertised by scripted plugins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,

    /// Opaque signature identifying a native plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_signature: Option<String>,

    /// Payload file lists; required for scripted bundles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<BundleContents>,

    /// Bundle format version, stamped when the manifest is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_format: Option<String>,

    /// Packaging time, seconds since epoch. Stamped at build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Short revision identifier of the source tree at packaging time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    /// Registry-assigned identifier, set exactly once at publish time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

impl Manifest {
    /// Load the manifest from a plugin source tree.
    ///
    /// Reads `content/metadata.json` under `source_dir`, strips comments,
    /// parses, validates, and stamps the current bundle format version.
    pub fn from_source_dir<P: AsRef<Path>>(source_dir: P) -> ManifestResult<Self> {
        let source_dir = source_dir.as_ref();
        let metadata_path = source_dir.join(METADATA_PATH);

        if !metadata_path.is_file() {
            return Err(ManifestError::NotFound {
                dir: source_dir.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(&metadata_path)?;
        let parsed: Manifest = serde_json::from_str(&strip_comments(&raw))?;

        let mut manifest = parsed.validate()?;
        manifest.bundle_format = Some(BUNDLE_FORMAT.to_string());
        Ok(manifest)
    }

    /// Parse a manifest from JSON (comments are not stripped here).
    pub fn from_json(json: &str) -> ManifestResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON with stable field order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Validate the manifest and return a normalized copy.
    ///
    /// The input is never modified; on success the returned copy has the
    /// legacy `author`/`email` pair folded into `authors` when that list
    /// was empty.
    pub fn validate(&self) -> ManifestResult<Self> {
        if self.plugin_id.is_empty() {
            return Err(ManifestError::MissingField("pluginId"));
        }
        if self.display_name.is_empty() {
            return Err(ManifestError::MissingField("displayName"));
        }
        if self.version.is_empty() {
            return Err(ManifestError::MissingField("version"));
        }
        if self.description.is_empty() {
            return Err(ManifestError::MissingField("description"));
        }

        match self.bundle_type {
            BundleType::Scripted => {
                let contents = self
                    .contents
                    .as_ref()
                    .ok_or(ManifestError::MissingField("contents"))?;
                if contents.entry_point.is_empty() {
                    return Err(ManifestError::MissingField("contents.entryPoint"));
                }
                if contents.icon.is_empty() {
                    return Err(ManifestError::MissingField("contents.icon"));
                }
            }
            BundleType::Native => {
                if self.native_signature.as_deref().unwrap_or("").is_empty() {
                    return Err(ManifestError::MissingField("nativeSignature"));
                }
            }
        }

        let mut normalized = self.clone();

        // backwards compatibility with flat author/email manifests
        if self.author.is_some() || self.email.is_some() {
            tracing::warn!(
                plugin = %self.plugin_id,
                "author and email fields are deprecated, use authors"
            );
            if normalized.authors.is_empty() {
                normalized.authors.push(Author {
                    name: self.author.clone().unwrap_or_default(),
                    email: self.email.clone().unwrap_or_default(),
                });
            }
        }

        if self.license.as_deref().unwrap_or("").is_empty() {
            tracing::warn!(plugin = %self.plugin_id, "license field is empty");
        }

        Ok(normalized)
    }

    /// File stem for the archive and its checksum sidecar.
    ///
    /// A publish-assigned bundle id takes precedence over the version.
    #[must_use]
    pub fn archive_stem(&self) -> String {
        match &self.bundle_id {
            Some(id) => format!("{}-{}", self.plugin_id, id),
            None => format!("{}-{}", self.plugin_id, self.version),
        }
    }

    /// Archive file name, e.g. `my-plugin-1.0.axe`.
    #[must_use]
    pub fn archive_file_name(&self) -> String {
        format!("{}.{}", self.archive_stem(), BUNDLE_EXTENSION)
    }

    /// Checksum sidecar file name, e.g. `my-plugin-1.0.md5`.
    #[must_use]
    pub fn checksum_file_name(&self) -> String {
        format!("{}.{}", self.archive_stem(), CHECKSUM_EXTENSION)
    }

    /// Relative archive paths of the payload files, in declared order.
    #[must_use]
    pub fn payload_files(&self) -> Vec<String> {
        let Some(contents) = &self.contents else {
            return Vec::new();
        };

        let mut files = Vec::new();
        if !contents.entry_point.is_empty() {
            files.push(contents.entry_point.clone());
        }
        if !contents.icon.is_empty() {
            files.push(contents.icon.clone());
        }
        files.extend(contents.scripts.iter().cloned());
        files.extend(contents.resources.iter().cloned());
        files
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    pub(crate) fn scripted_manifest() -> Manifest {
        Manifest {
            plugin_id: "test-plugin".to_string(),
            display_name: "Test Plugin".to_string(),
            version: "1.0".to_string(),
            description: "A test plugin".to_string(),
            bundle_type: BundleType::Scripted,
            platform: String::new(),
            min_runtime_version: None,
            license: Some("MIT".to_string()),
            authors: Vec::new(),
            author: None,
            email: None,
            website: None,
            features: Vec::new(),
            native_signature: None,
            contents: Some(BundleContents {
                entry_point: "main.js".to_string(),
                icon: "icon.png".to_string(),
                scripts: Vec::new(),
                resources: Vec::new(),
            }),
            bundle_format: None,
            timestamp: None,
            revision: None,
            bundle_id: None,
        }
    }

    #[test]
    fn Manifest___validate___accepts_minimal_scripted() {
        let manifest = scripted_manifest();

        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn Manifest___validate___rejects_empty_plugin_id() {
        let mut manifest = scripted_manifest();
        manifest.plugin_id = String::new();

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("pluginId"));
    }

    #[test]
    fn Manifest___validate___scripted_requires_entry_point() {
        let mut manifest = scripted_manifest();
        manifest.contents.as_mut().unwrap().entry_point = String::new();

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("entryPoint"));
    }

    #[test]
    fn Manifest___validate___scripted_requires_icon() {
        let mut manifest = scripted_manifest();
        manifest.contents.as_mut().unwrap().icon = String::new();

        assert!(manifest.validate().is_err());
    }

    #[test]
    fn Manifest___validate___native_does_not_require_entry_point() {
        let mut manifest = scripted_manifest();
        manifest.bundle_type = BundleType::Native;
        manifest.native_signature = Some("sig:abc".to_string());
        manifest.contents = None;

        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn Manifest___validate___native_requires_signature() {
        let mut manifest = scripted_manifest();
        manifest.bundle_type = BundleType::Native;
        manifest.contents = None;

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("nativeSignature"));
    }

    #[test]
    fn Manifest___validate___synthesizes_authors_from_legacy_pair() {
        let mut manifest = scripted_manifest();
        manifest.author = Some("Jane Doe".to_string());
        manifest.email = Some("jane@example.org".to_string());

        let normalized = manifest.validate().unwrap();

        assert_eq!(normalized.authors.len(), 1);
        assert_eq!(normalized.authors[0].name, "Jane Doe");
        assert_eq!(normalized.authors[0].email, "jane@example.org");
        // input untouched
        assert!(manifest.authors.is_empty());
    }

    #[test]
    fn Manifest___validate___keeps_explicit_authors_over_legacy_pair() {
        let mut manifest = scripted_manifest();
        manifest.authors = vec![Author {
            name: "Real Author".to_string(),
            email: "real@example.org".to_string(),
        }];
        manifest.author = Some("Old Author".to_string());

        let normalized = manifest.validate().unwrap();

        assert_eq!(normalized.authors.len(), 1);
        assert_eq!(normalized.authors[0].name, "Real Author");
    }

    #[test]
    fn Manifest___validate___missing_license_is_not_fatal() {
        let mut manifest = scripted_manifest();
        manifest.license = None;

        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn Manifest___from_json___rejects_unknown_bundle_type() {
        let json = r#"{
            "pluginId": "p", "displayName": "P", "version": "1.0",
            "description": "d", "bundleType": "binary"
        }"#;

        assert!(Manifest::from_json(json).is_err());
    }

    #[test]
    fn Manifest___archive_stem___prefers_bundle_id() {
        let mut manifest = scripted_manifest();
        assert_eq!(manifest.archive_stem(), "test-plugin-1.0");

        manifest.bundle_id = Some("0000-1111".to_string());
        assert_eq!(manifest.archive_stem(), "test-plugin-0000-1111");
        assert_eq!(manifest.archive_file_name(), "test-plugin-0000-1111.axe");
        assert_eq!(manifest.checksum_file_name(), "test-plugin-0000-1111.md5");
    }

    #[test]
    fn Manifest___payload_files___preserves_declared_order() {
        let mut manifest = scripted_manifest();
        manifest.contents = Some(BundleContents {
            entry_point: "main.js".to_string(),
            icon: "icon.png".to_string(),
            scripts: vec!["lib/a.js".to_string(), "lib/b.js".to_string()],
            resources: vec!["data.json".to_string()],
        });

        assert_eq!(
            manifest.payload_files(),
            vec!["main.js", "icon.png", "lib/a.js", "lib/b.js", "data.json"]
        );
    }

    #[test]
    fn Manifest___from_source_dir___stamps_bundle_format() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(
            content.join("metadata.json"),
            scripted_manifest().to_json().unwrap(),
        )
        .unwrap();

        let manifest = Manifest::from_source_dir(dir.path()).unwrap();

        assert_eq!(manifest.bundle_format.as_deref(), Some(BUNDLE_FORMAT));
    }

    #[test]
    fn Manifest___from_source_dir___missing_metadata___returns_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = Manifest::from_source_dir(dir.path()).unwrap_err();

        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn Manifest___from_source_dir___accepts_commented_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(&content).unwrap();

        let json = format!(
            "// top note\n{}\n",
            scripted_manifest().to_json().unwrap()
        );
        fs::write(content.join("metadata.json"), json).unwrap();

        assert!(Manifest::from_source_dir(dir.path()).is_ok());
    }

    #[test]
    fn Manifest___json_roundtrip___preserves_fields() {
        let mut manifest = scripted_manifest();
        manifest.platform = "linux-x86_64".to_string();
        manifest.min_runtime_version = Some("0.9".to_string());
        manifest.features = vec!["urllookup".to_string()];

        let json = manifest.to_json().unwrap();
        let parsed = Manifest::from_json(&json).unwrap();

        assert_eq!(parsed.plugin_id, manifest.plugin_id);
        assert_eq!(parsed.platform, "linux-x86_64");
        assert_eq!(parsed.min_runtime_version.as_deref(), Some("0.9"));
        assert_eq!(parsed.features, vec!["urllookup".to_string()]);
    }
}
