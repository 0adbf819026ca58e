//! Publish command implementation.
//!
//! Runs the publish pipeline against the configured record store and
//! archive cache, then prints the batch summary.

use crate::package::discover_source_dirs;
use anyhow::{Context, Result};
use haft_registry::{FileStore, PublishPipeline, RegistryConfig};
use std::fs;
use std::path::Path;

pub fn run(source: &str, config_path: &str, all: bool) -> Result<()> {
    let source = fs::canonicalize(source)
        .with_context(|| format!("bad source directory path: {source}"))?;

    let config = RegistryConfig::load(config_path)
        .with_context(|| format!("cannot load registry configuration from {config_path}"))?;

    fs::create_dir_all(&config.cache_directory).with_context(|| {
        format!(
            "cannot create cache directory {}",
            config.cache_directory.display()
        )
    })?;

    let store = FileStore::open(&config.store_path).with_context(|| {
        format!("cannot open record store {}", config.store_path.display())
    })?;

    let dirs = discover_source_dirs(&source, all)?;

    let pipeline = PublishPipeline::new(
        &store,
        &config.cache_directory,
        config.server.cache_path.clone(),
    );
    let summary = pipeline.publish(&dirs);

    write_cache_index(&config.cache_directory);

    print!(
        "{}",
        crate::summary::render(
            &format!(
                "Record store: {}; cache directory: {}\n",
                config.store_path.display(),
                config.cache_directory.display()
            ),
            &summary
        )
    );
    Ok(())
}

/// Drop a placeholder index page into the cache directory so directory
/// listings are never exposed. Failure only warns.
fn write_cache_index(cache_dir: &Path) {
    let index = cache_dir.join("index.html");
    if index.exists() {
        return;
    }

    let body = "<html><head><title>haft registry</title></head>\
                <body>Bundle cache directory. Move along, nothing to see here.</body></html>";
    if fs::write(&index, body).is_err() {
        tracing::warn!(path = %index.display(), "could not write cache index file");
    }
}
