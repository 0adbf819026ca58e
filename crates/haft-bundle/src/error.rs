//! Error types for bundle operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a plugin manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No `content/metadata.json` under the source directory.
    #[error("no manifest found in {}: make sure content/metadata.json exists and is readable", dir.display())]
    NotFound { dir: PathBuf },

    /// I/O error reading the manifest file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest is not valid JSON or a typed field has the wrong shape.
    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is missing or empty.
    #[error("invalid manifest: {0} is required")]
    MissingField(&'static str),
}

/// Errors that can occur while creating or reading an archive.
#[derive(Debug, Error)]
pub enum PackageError {
    /// Manifest loading or validation failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Target archive already exists and overwrite was not forced.
    ///
    /// Batch callers treat this as a skip, not a failure; the existing
    /// path is carried so it can still be displayed.
    #[error("archive already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// A file referenced by the manifest is missing from the source tree.
    #[error("missing referenced file: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A required member is missing from an archive being read.
    #[error("missing archive member: {name}")]
    MissingMember { name: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// JSON serialization error while writing the stamped manifest.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn ManifestError___missing_field___displays_field_name() {
        let err = ManifestError::MissingField("pluginId");

        assert_eq!(err.to_string(), "invalid manifest: pluginId is required");
    }

    #[test]
    fn ManifestError___not_found___displays_directory() {
        let err = ManifestError::NotFound {
            dir: PathBuf::from("/plugins/foo"),
        };

        assert!(err.to_string().contains("/plugins/foo"));
        assert!(err.to_string().contains("content/metadata.json"));
    }

    #[test]
    fn PackageError___already_exists___displays_path() {
        let err = PackageError::AlreadyExists {
            path: PathBuf::from("/out/foo-1.0.axe"),
        };

        assert_eq!(err.to_string(), "archive already exists: /out/foo-1.0.axe");
    }

    #[test]
    fn PackageError___from_manifest_error___converts() {
        let err: PackageError = ManifestError::MissingField("version").into();

        assert!(matches!(err, PackageError::Manifest(_)));
    }

    #[test]
    fn PackageError___from_io_error___converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: PackageError = io_err.into();

        assert!(matches!(err, PackageError::Io(_)));
    }
}
