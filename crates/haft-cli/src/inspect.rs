//! Inspect command implementation.

use anyhow::{Context, Result};
use haft_bundle::BundleReader;

pub fn run(bundle_path: &str) -> Result<()> {
    let reader =
        BundleReader::open(bundle_path).with_context(|| format!("failed to open: {bundle_path}"))?;

    let manifest = reader.manifest();
    println!("Bundle: {} v{}", manifest.display_name, manifest.version);
    println!("Plugin id: {}", manifest.plugin_id);
    if let Some(format) = &manifest.bundle_format {
        println!("Bundle format: v{format}");
    }
    println!("Description: {}", manifest.description);

    if !manifest.platform.is_empty() {
        println!("Platform: {}", manifest.platform);
    }
    if let Some(min) = &manifest.min_runtime_version {
        println!("Minimum runtime: {min}");
    }
    if let Some(timestamp) = manifest.timestamp {
        println!("Packaged at: {timestamp}");
    }
    if let Some(revision) = &manifest.revision {
        println!("Revision: {revision}");
    }
    if let Some(id) = &manifest.bundle_id {
        println!("Bundle id: {id}");
    }

    if !manifest.authors.is_empty() {
        println!("\nAuthors:");
        for author in &manifest.authors {
            if author.email.is_empty() {
                println!("  {}", author.name);
            } else {
                println!("  {} <{}>", author.name, author.email);
            }
        }
    }

    println!("\nFiles:");
    for member in reader.list_members() {
        println!("  {member}");
    }

    Ok(())
}
