//! Archive reading.
//!
//! The [`BundleReader`] opens a built `.axe` archive and exposes the
//! embedded stamped manifest and the archive members.

use crate::{METADATA_PATH, Manifest, PackageError, PackageResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Reader for packaged bundles.
///
/// # Example
///
/// ```no_run
/// use haft_bundle::BundleReader;
///
/// let reader = BundleReader::open("dist/my-plugin-1.0.axe")?;
/// println!("{} v{}", reader.manifest().display_name, reader.manifest().version);
/// # Ok::<(), haft_bundle::PackageError>(())
/// ```
#[derive(Debug)]
pub struct BundleReader {
    archive: ZipArchive<File>,
    manifest: Manifest,
}

impl BundleReader {
    /// Open an archive and parse its embedded manifest.
    pub fn open<P: AsRef<Path>>(path: P) -> PackageResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut archive = ZipArchive::new(file)?;

        let manifest = {
            let mut member = archive.by_name(METADATA_PATH).map_err(|_| {
                PackageError::MissingMember {
                    name: METADATA_PATH.to_string(),
                }
            })?;

            let mut json = String::new();
            member.read_to_string(&mut json)?;
            Manifest::from_json(&json)?
        };

        let manifest = manifest.validate()?;

        Ok(Self { archive, manifest })
    }

    /// The stamped manifest embedded in the archive.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Names of all archive members.
    #[must_use]
    pub fn list_members(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(String::from))
            .collect()
    }

    /// Whether the archive contains a member with this name.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Read a member's bytes.
    pub fn read_member(&mut self, name: &str) -> PackageResult<Vec<u8>> {
        let mut member =
            self.archive
                .by_name(name)
                .map_err(|_| PackageError::MissingMember {
                    name: name.to_string(),
                })?;

        let mut contents = Vec::new();
        member.read_to_end(&mut contents)?;
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        for (name, body) in members {
            zip.start_file(*name, options).unwrap();
            zip.write_all(body).unwrap();
        }
        zip.finish().unwrap();
    }

    fn minimal_metadata() -> String {
        serde_json::json!({
            "pluginId": "foo",
            "displayName": "Foo",
            "version": "1.0",
            "description": "d",
            "bundleType": "scripted",
            "contents": { "entryPoint": "main.js", "icon": "icon.png" }
        })
        .to_string()
    }

    #[test]
    fn BundleReader___open___reads_embedded_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo-1.0.axe");
        write_zip(
            &path,
            &[
                (METADATA_PATH, minimal_metadata().as_bytes()),
                ("content/main.js", b"code"),
            ],
        );

        let reader = BundleReader::open(&path).unwrap();

        assert_eq!(reader.manifest().plugin_id, "foo");
        assert!(reader.has_member("content/main.js"));
    }

    #[test]
    fn BundleReader___open___missing_metadata___returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.axe");
        write_zip(&path, &[("content/main.js", b"code")]);

        let err = BundleReader::open(&path).unwrap_err();

        assert!(matches!(err, PackageError::MissingMember { .. }));
    }

    #[test]
    fn BundleReader___open___not_a_zip___returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.axe");
        fs::write(&path, b"not a zip file").unwrap();

        assert!(BundleReader::open(&path).is_err());
    }

    #[test]
    fn BundleReader___read_member___returns_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo-1.0.axe");
        write_zip(
            &path,
            &[
                (METADATA_PATH, minimal_metadata().as_bytes()),
                ("content/main.js", b"exports = 1;"),
            ],
        );

        let mut reader = BundleReader::open(&path).unwrap();

        assert_eq!(reader.read_member("content/main.js").unwrap(), b"exports = 1;");
        assert!(reader.read_member("content/missing.js").is_err());
    }
}
