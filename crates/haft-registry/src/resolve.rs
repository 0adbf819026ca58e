//! Registry resolution.
//!
//! Pure, read-only computation over a snapshot of published records:
//! filter by platform and runtime compatibility, group by plugin, pick
//! the newest version per group, and shape the response either as a
//! public listing or as a single download location.

use crate::{BundleRecord, RegistryError, RegistryResult};
use haft_bundle::{Manifest, version};
use std::cmp::Ordering;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// A client's view of the registry.
#[derive(Debug, Clone, Default)]
pub struct ResolveQuery {
    /// Host runtime version; empty accepts every bundle.
    pub runtime_version: String,

    /// Client platform; bundles declaring an empty or `"any"` platform
    /// always match.
    pub platform: String,
}

/// Download location for a single resolved bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntry {
    pub plugin_id: String,
    pub version: String,
    pub content_path: String,
}

/// Public listing of the newest compatible bundle per plugin.
///
/// Entries are stripped for publication: build timestamp, contents
/// detail, bundle id, features, and the legacy author/email pair are
/// removed.
pub fn listing(records: &[BundleRecord], query: &ResolveQuery) -> Vec<Manifest> {
    winners(records, query, None)
        .into_iter()
        .map(|record| public_entry(&record.manifest))
        .collect()
}

/// Resolve a single plugin to its newest compatible bundle.
///
/// Exactly one winner is expected; zero or several is a server-side
/// consistency problem and aborts the request rather than guessing.
pub fn resolve(
    records: &[BundleRecord],
    query: &ResolveQuery,
    plugin_name: &str,
) -> RegistryResult<ResolvedEntry> {
    let matches = winners(records, query, Some(plugin_name));

    if matches.len() != 1 {
        tracing::error!(
            plugin = %plugin_name,
            matches = matches.len(),
            "bad entry count for plugin"
        );
        return Err(RegistryError::Consistency {
            plugin_name: plugin_name.to_string(),
            matches: matches.len(),
        });
    }

    let record = matches[0];
    Ok(ResolvedEntry {
        plugin_id: record.manifest.plugin_id.clone(),
        version: record.manifest.version.clone(),
        content_path: record.content_path(),
    })
}

/// The newest compatible record per plugin, in first-seen plugin order.
///
/// Ties on equal versions keep the first-seen record; equal versions
/// should not coexist for one plugin in a consistent store.
fn winners<'a>(
    records: &'a [BundleRecord],
    query: &ResolveQuery,
    plugin_name: Option<&str>,
) -> Vec<&'a BundleRecord> {
    let mut selected: Vec<&BundleRecord> = Vec::new();
    let mut by_plugin: HashMap<&str, usize> = HashMap::new();

    let eligible = records
        .iter()
        .filter(|r| platform_eligible(r, &query.platform))
        .filter(|r| plugin_name.is_none_or(|name| r.manifest.plugin_id == name))
        .filter(|r| runtime_compatible(r, &query.runtime_version));

    for record in eligible {
        match by_plugin.get(record.manifest.plugin_id.as_str()) {
            Some(&i) => {
                let current = &selected[i].manifest.version;
                if version::compare(&record.manifest.version, current) == Ordering::Greater {
                    selected[i] = record;
                }
            }
            None => {
                by_plugin.insert(record.manifest.plugin_id.as_str(), selected.len());
                selected.push(record);
            }
        }
    }

    selected
}

fn platform_eligible(record: &BundleRecord, platform: &str) -> bool {
    let p = record.manifest.platform.as_str();
    p.is_empty() || p == "any" || p == platform
}

/// Client runtime must be at least the bundle's declared minimum; an
/// empty value on either side accepts.
fn runtime_compatible(record: &BundleRecord, runtime_version: &str) -> bool {
    if runtime_version.is_empty() {
        return true;
    }
    match record.manifest.min_runtime_version.as_deref() {
        None | Some("") => true,
        Some(min) => version::compare(runtime_version, min) != Ordering::Less,
    }
}

/// Strip a manifest down to its publishable fields.
fn public_entry(manifest: &Manifest) -> Manifest {
    let mut entry = manifest.clone();
    entry.timestamp = None;
    entry.contents = None;
    entry.bundle_id = None;
    entry.features = Vec::new();
    // don't ship legacy-formatted info
    entry.author = None;
    entry.email = None;
    entry
}
