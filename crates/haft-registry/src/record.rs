//! Published bundle records.

use haft_bundle::Manifest;
use serde::{Deserialize, Serialize};

/// One successfully packaged and published archive.
///
/// Records are frozen at publish time and never mutated afterwards; later
/// edits to the plugin's source tree do not alter the embedded manifest
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleRecord {
    /// Registry-assigned identifier, globally unique, assigned exactly
    /// once.
    pub bundle_id: String,

    /// Manifest snapshot as stamped at packaging time.
    pub manifest: Manifest,

    /// Archive file name, `<pluginId>-<bundleId>.axe`.
    pub archive_filename: String,

    /// Checksum sidecar file name, `<pluginId>-<bundleId>.md5`.
    pub checksum_filename: String,

    /// Public path prefix under which the archive is served.
    pub cache_relative_path: String,
}

impl BundleRecord {
    /// Freeze a stamped manifest into a record under the given bundle id.
    #[must_use]
    pub fn freeze(mut manifest: Manifest, bundle_id: String, cache_relative_path: String) -> Self {
        manifest.bundle_id = Some(bundle_id.clone());

        let archive_filename = manifest.archive_file_name();
        let checksum_filename = manifest.checksum_file_name();

        Self {
            bundle_id,
            manifest,
            archive_filename,
            checksum_filename,
            cache_relative_path,
        }
    }

    /// Public URL path of the archive: the cache-relative path joined
    /// with the archive file name.
    #[must_use]
    pub fn content_path(&self) -> String {
        let prefix = self.cache_relative_path.trim_end_matches('/');
        if prefix.is_empty() {
            self.archive_filename.clone()
        } else {
            format!("{prefix}/{}", self.archive_filename)
        }
    }
}
