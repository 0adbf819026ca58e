//! Publish pipeline.
//!
//! Packages each source tree once and inserts its frozen record into the
//! store. One directory's failure never aborts the batch; every directory
//! is classified into exactly one of the summary's three buckets.

use crate::{BundleRecord, RecordStore, StoreError};
use haft_bundle::{PackageError, PackageOptions, Packager};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Outcome of one publish batch, keyed by source-directory name.
///
/// The buckets are disjoint: a directory lands in exactly one.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Packaged and recorded in this run.
    pub built: Vec<String>,

    /// Already published (or already built) and left untouched.
    pub skipped: Vec<String>,

    /// Failed; the batch continued past them.
    pub errored: Vec<String>,
}

impl Summary {
    /// Total number of classified directories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.built.len() + self.skipped.len() + self.errored.len()
    }
}

/// Publishes plugin source trees into a record store and archive cache.
pub struct PublishPipeline<'a> {
    store: &'a dyn RecordStore,
    cache_dir: PathBuf,
    cache_prefix: String,
}

impl<'a> PublishPipeline<'a> {
    /// `cache_dir` is where archives are written; `cache_prefix` is the
    /// public path under which they will be served, frozen into each
    /// record.
    pub fn new<P: AsRef<Path>>(
        store: &'a dyn RecordStore,
        cache_dir: P,
        cache_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache_dir: cache_dir.as_ref().to_path_buf(),
            cache_prefix: cache_prefix.into(),
        }
    }

    /// Publish each source directory, collecting a full summary.
    pub fn publish(&self, source_dirs: &[PathBuf]) -> Summary {
        let mut summary = Summary::default();

        for dir in source_dirs {
            let name = dir_name(dir);
            match self.publish_one(dir) {
                Ok(Outcome::Built) => summary.built.push(name),
                Ok(Outcome::Skipped) => summary.skipped.push(name),
                Err(err) => {
                    tracing::warn!(directory = %name, error = %err, "could not publish bundle");
                    summary.errored.push(name);
                }
            }
        }

        summary
    }

    fn publish_one(&self, dir: &Path) -> Result<Outcome, PublishError> {
        let mut packager = Packager::load(dir).map_err(PackageError::from)?;

        let (plugin_id, plugin_version) = {
            let manifest = packager.manifest();
            (manifest.plugin_id.clone(), manifest.version.clone())
        };

        if self.store.contains(&plugin_id, &plugin_version)? {
            tracing::info!(
                plugin = %plugin_id,
                version = %plugin_version,
                "bundle is already published, skipping"
            );
            return Ok(Outcome::Skipped);
        }

        let bundle_id = Uuid::new_v4().to_string();
        packager.assign_bundle_id(bundle_id.clone());

        let options = PackageOptions {
            release: true,
            force: false,
        };
        match packager.create_package(&self.cache_dir, &options) {
            Ok(archive) => {
                tracing::info!(archive = %archive.display(), "created bundle");
            }
            Err(PackageError::AlreadyExists { path }) => {
                tracing::info!(archive = %path.display(), "archive already exists, skipping");
                return Ok(Outcome::Skipped);
            }
            Err(err) => return Err(err.into()),
        }

        let record = BundleRecord::freeze(
            packager.manifest().clone(),
            bundle_id,
            self.cache_prefix.clone(),
        );

        match self.store.insert(record) {
            Ok(()) => Ok(Outcome::Built),
            // A concurrent publisher won the race; their record stands.
            Err(StoreError::Duplicate { .. }) => Ok(Outcome::Skipped),
            Err(err) => Err(err.into()),
        }
    }
}

enum Outcome {
    Built,
    Skipped,
}

#[derive(Debug, thiserror::Error)]
enum PublishError {
    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
