//! Record store implementations.
//!
//! The document store actually holding published records is a deployment
//! concern; [`RecordStore`] is the seam the registry and the publish
//! pipeline depend on. [`MemoryStore`] backs tests, [`FileStore`] keeps a
//! JSON file on disk and is shared by the CLI and the server.

use crate::{BundleRecord, StoreError, StoreResult};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage seam for published bundle records.
///
/// `insert` enforces uniqueness on `(pluginId, version)`; the resulting
/// [`StoreError::Duplicate`] is the authoritative duplicate-publication
/// signal.
pub trait RecordStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Duplicate`] when a
    /// record with the same `(pluginId, version)` already exists.
    fn insert(&self, record: BundleRecord) -> StoreResult<()>;

    /// Whether a record with this `(pluginId, version)` exists.
    fn contains(&self, plugin_id: &str, version: &str) -> StoreResult<bool>;

    /// All records whose platform is empty, `"any"`, or exactly the given
    /// platform.
    fn find_for_platform(&self, platform: &str) -> StoreResult<Vec<BundleRecord>>;
}

fn platform_matches(record: &BundleRecord, platform: &str) -> bool {
    let p = record.manifest.platform.as_str();
    p.is_empty() || p == "any" || p == platform
}

fn find_duplicate(records: &[BundleRecord], plugin_id: &str, version: &str) -> bool {
    records
        .iter()
        .any(|r| r.manifest.plugin_id == plugin_id && r.manifest.version == version)
}

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<BundleRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, record: BundleRecord) -> StoreResult<()> {
        let mut records = self.records.write();
        if find_duplicate(&records, &record.manifest.plugin_id, &record.manifest.version) {
            return Err(StoreError::Duplicate {
                plugin_id: record.manifest.plugin_id.clone(),
                version: record.manifest.version.clone(),
            });
        }
        records.push(record);
        Ok(())
    }

    fn contains(&self, plugin_id: &str, version: &str) -> StoreResult<bool> {
        Ok(find_duplicate(&self.records.read(), plugin_id, version))
    }

    fn find_for_platform(&self, platform: &str) -> StoreResult<Vec<BundleRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| platform_matches(r, platform))
            .cloned()
            .collect())
    }
}

/// JSON-file-backed record store.
///
/// The whole record set is loaded at open time and rewritten on every
/// insert; publication is an infrequent, operator-driven action, so the
/// full rewrite is acceptable.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: RwLock<Vec<BundleRecord>>,
}

impl FileStore {
    /// Open a store file, creating an empty store when the file does not
    /// exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = if path.is_file() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn flush(&self, records: &[BundleRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn insert(&self, record: BundleRecord) -> StoreResult<()> {
        let mut records = self.records.write();
        if find_duplicate(&records, &record.manifest.plugin_id, &record.manifest.version) {
            return Err(StoreError::Duplicate {
                plugin_id: record.manifest.plugin_id.clone(),
                version: record.manifest.version.clone(),
            });
        }
        records.push(record);
        self.flush(&records)
    }

    fn contains(&self, plugin_id: &str, version: &str) -> StoreResult<bool> {
        Ok(find_duplicate(&self.records.read(), plugin_id, version))
    }

    fn find_for_platform(&self, platform: &str) -> StoreResult<Vec<BundleRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| platform_matches(r, platform))
            .cloned()
            .collect())
    }
}
