//! Plugin bundle format for haft
//!
//! This crate provides types and utilities for creating and reading `.axe`
//! bundles - versioned, checksummed archives containing a plugin's files and
//! its stamped metadata.
//!
//! # Bundle Structure
//!
//! ```text
//! my-plugin-1.0.axe
//! └── content/
//!     ├── metadata.json          # stamped manifest, always present
//!     ├── my-plugin.js           # entry point
//!     ├── icon.png
//!     └── ...                    # scripts and resources, in declared order
//! ```
//!
//! A sidecar checksum file (`my-plugin-1.0.md5`) is written next to the
//! archive, holding the MD5 digest of the archive file itself.
//!
//! # Example
//!
//! ```no_run
//! use haft_bundle::{PackageOptions, Packager};
//!
//! let mut packager = Packager::load("plugins/my-plugin")?;
//! let archive = packager.create_package("dist", &PackageOptions::default())?;
//! println!("built {}", archive.display());
//! # Ok::<(), haft_bundle::PackageError>(())
//! ```

mod error;
mod minify;

pub mod manifest;
pub mod packager;
pub mod reader;
pub mod version;

pub use error::{ManifestError, PackageError};
pub use manifest::{Author, BundleContents, BundleType, Manifest};
pub use packager::{PackageOptions, Packager};
pub use reader::BundleReader;

/// Result type for manifest loading and validation.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Result type for packaging and archive operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Bundle file extension.
pub const BUNDLE_EXTENSION: &str = "axe";

/// Checksum sidecar file extension.
pub const CHECKSUM_EXTENSION: &str = "md5";

/// Current bundle format version, stamped into every loaded manifest.
pub const BUNDLE_FORMAT: &str = "2";

/// Manifest location inside a source tree and inside the archive.
pub const METADATA_PATH: &str = "content/metadata.json";

/// Root directory for plugin files inside the archive.
pub const CONTENT_ROOT: &str = "content";
