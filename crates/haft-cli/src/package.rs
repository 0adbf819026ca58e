//! Package command implementation.
//!
//! Builds bundles into a destination directory without touching any
//! registry. With `--all`, every immediate subdirectory of the source
//! that looks like a plugin tree is built.

use anyhow::{Context, Result};
use haft_bundle::{METADATA_PATH, PackageError, PackageOptions, Packager};
use haft_registry::Summary;
use std::fs;
use std::path::{Path, PathBuf};

pub fn run(
    source: &str,
    destination: Option<&str>,
    all: bool,
    release: bool,
    force: bool,
) -> Result<()> {
    let source = fs::canonicalize(source)
        .with_context(|| format!("bad source directory path: {source}"))?;

    let destination = match destination {
        Some(dest) => fs::canonicalize(dest)
            .with_context(|| format!("bad destination directory path: {dest}"))?,
        None => source.clone(),
    };

    let dirs = discover_source_dirs(&source, all)?;
    let options = PackageOptions { release, force };

    let summary = build_all(&dirs, &destination, &options);

    print!(
        "{}",
        crate::summary::render(
            &format!("Output directory: {}\n", destination.display()),
            &summary
        )
    );
    Ok(())
}

/// Build each source tree, classifying outcomes into the summary buckets.
pub fn build_all(dirs: &[PathBuf], destination: &Path, options: &PackageOptions) -> Summary {
    let mut summary = Summary::default();

    for dir in dirs {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        let mut packager = match Packager::load(dir) {
            Ok(packager) => packager,
            Err(err) => {
                eprintln!("Warning: could not load bundle from directory {name}: {err}");
                summary.errored.push(name);
                continue;
            }
        };

        match packager.create_package(destination, options) {
            Ok(archive) => {
                println!("* Created bundle in {}", archive.display());
                summary.built.push(name);
            }
            Err(PackageError::AlreadyExists { path }) => {
                println!("* {} already exists, skipping", path.display());
                summary.skipped.push(name);
            }
            Err(err) => {
                eprintln!("Warning: could not build bundle for directory {name}: {err}");
                summary.errored.push(name);
            }
        }
    }

    summary
}

/// The list of plugin trees to build.
///
/// Without `--all` this is the source directory itself. With `--all`,
/// each immediate subdirectory holding a `content/metadata.json` is
/// included; others are reported and skipped.
pub fn discover_source_dirs(source: &Path, all: bool) -> Result<Vec<PathBuf>> {
    if !all {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut dirs = Vec::new();
    let entries = fs::read_dir(source)
        .with_context(|| format!("cannot read source directory {}", source.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.join(METADATA_PATH).is_file() {
            dirs.push(path);
        } else {
            eprintln!(
                "{} does not seem to be a plugin directory, skipping",
                entry.file_name().to_string_lossy()
            );
        }
    }

    dirs.sort();
    Ok(dirs)
}
