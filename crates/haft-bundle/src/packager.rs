//! Archive creation.
//!
//! The [`Packager`] turns one plugin source tree into a `.axe` archive:
//! it validates the manifest, stamps build metadata, assembles the ZIP
//! payload in declared order, and writes an MD5 checksum sidecar.

use crate::{
    BUNDLE_FORMAT, CONTENT_ROOT, METADATA_PATH, Manifest, ManifestResult, PackageError,
    PackageResult,
};
use md5::{Digest, Md5};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Per-call packaging switches.
///
/// Passed explicitly into [`Packager::create_package`]; there is no
/// process-wide packaging state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageOptions {
    /// Release build: never attempt to resolve a source revision.
    pub release: bool,

    /// Overwrite an existing target archive instead of skipping.
    pub force: bool,
}

/// Builds one archive from a plugin source tree.
///
/// # Example
///
/// ```no_run
/// use haft_bundle::{PackageOptions, Packager};
///
/// let mut packager = Packager::load("plugins/my-plugin")?;
/// let options = PackageOptions { release: true, force: false };
/// let archive = packager.create_package("dist", &options)?;
/// # Ok::<(), haft_bundle::PackageError>(())
/// ```
#[derive(Debug)]
pub struct Packager {
    manifest: Manifest,
    source_dir: PathBuf,
}

impl Packager {
    /// Load and validate the manifest from a plugin source tree.
    pub fn load<P: AsRef<Path>>(source_dir: P) -> ManifestResult<Self> {
        let source_dir = source_dir.as_ref().to_path_buf();
        let manifest = Manifest::from_source_dir(&source_dir)?;
        Ok(Self {
            manifest,
            source_dir,
        })
    }

    /// The validated manifest. After a successful
    /// [`create_package`](Self::create_package) call this carries the
    /// stamped build metadata.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Assign the registry bundle id used for output file naming.
    pub fn assign_bundle_id(&mut self, bundle_id: String) {
        self.manifest.bundle_id = Some(bundle_id);
    }

    /// Create the archive in `output_dir` and return its absolute path.
    ///
    /// The target file name is `<pluginId>-<bundleId>.axe` when a bundle
    /// id has been assigned, `<pluginId>-<version>.axe` otherwise. If the
    /// target already exists and `force` is not set, this fails with
    /// [`PackageError::AlreadyExists`], which batch callers treat as a
    /// skip. The archive is written to a temporary file and renamed into
    /// place, so a failed run never leaves a partial archive at the
    /// target path.
    pub fn create_package<P: AsRef<Path>>(
        &mut self,
        output_dir: P,
        options: &PackageOptions,
    ) -> PackageResult<PathBuf> {
        let output_dir = output_dir.as_ref();
        let archive_name = self.manifest.archive_file_name();
        let target = output_dir.join(&archive_name);

        if !options.force && target.exists() {
            return Err(PackageError::AlreadyExists { path: target });
        }

        let stamped = self.stamp_manifest(options);
        let metadata_json = serde_json::to_string_pretty(&stamped)?;

        self.write_archive(&target, output_dir, &metadata_json)?;

        // The archive is complete at this point; checksum trouble only warns.
        let sidecar = output_dir.join(self.manifest.checksum_file_name());
        if let Err(err) = write_checksum(&target, &archive_name, &sidecar) {
            tracing::warn!(
                archive = %archive_name,
                error = %err,
                "could not create checksum file"
            );
        }

        self.manifest = stamped;

        Ok(target.canonicalize().unwrap_or(target))
    }

    /// Clone the manifest and add the build metadata: packaging timestamp
    /// and, for non-release builds, the source tree's short revision.
    fn stamp_manifest(&self, options: &PackageOptions) -> Manifest {
        let mut stamped = self.manifest.clone();
        stamped.bundle_format = Some(BUNDLE_FORMAT.to_string());
        stamped.timestamp = Some(unix_timestamp());

        if !options.release {
            match resolve_revision(&self.source_dir) {
                Some(revision) => stamped.revision = Some(revision),
                None => {
                    tracing::warn!(
                        plugin = %self.manifest.plugin_id,
                        version = %self.manifest.version,
                        "cannot resolve revision for source tree"
                    );
                }
            }
        }

        stamped
    }

    fn write_archive(
        &self,
        target: &Path,
        output_dir: &Path,
        metadata_json: &str,
    ) -> PackageResult<()> {
        let temp = NamedTempFile::new_in(output_dir)?;
        let mut zip = ZipWriter::new(temp);
        let zip_options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file(METADATA_PATH, zip_options)?;
        zip.write_all(metadata_json.as_bytes())?;

        for relative in self.manifest.payload_files() {
            let source_path = self.source_dir.join(CONTENT_ROOT).join(&relative);
            let body = fs::read(&source_path)
                .map_err(|_| PackageError::MissingFile { path: source_path })?;

            zip.start_file(format!("{CONTENT_ROOT}/{relative}"), zip_options)?;
            zip.write_all(&body)?;
        }

        let temp = zip.finish()?;
        // Atomic rename; also replaces any leftover target from a prior run.
        temp.persist(target).map_err(|err| PackageError::Io(err.error))?;
        Ok(())
    }
}

/// Compute the archive's MD5 digest and write the sidecar file
/// (`<hex-digest>\t<archive-filename>`).
fn write_checksum(archive: &Path, archive_name: &str, sidecar: &Path) -> PackageResult<()> {
    let digest = md5_hex(archive)?;
    fs::write(sidecar, format!("{digest}\t{archive_name}"))?;
    Ok(())
}

/// MD5 digest of a file, as lowercase hex.
pub fn md5_hex<P: AsRef<Path>>(path: P) -> PackageResult<String> {
    let mut file = File::open(path.as_ref())?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Short revision of the source tree, if it is a git checkout.
fn resolve_revision(source_dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .current_dir(source_dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if revision.is_empty() { None } else { Some(revision) }
}
