//! Error types for registry operations.

use thiserror::Error;

/// Errors raised by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this `(pluginId, version)` pair is already stored.
    ///
    /// Insertion enforces uniqueness, so this conflict is the
    /// authoritative duplicate-publication signal even when a read-side
    /// check raced.
    #[error("bundle {plugin_id}-{version} is already published")]
    Duplicate { plugin_id: String, version: String },

    /// I/O error reading or writing the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a valid record set.
    #[error("malformed record store: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by registry resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A single-plugin query matched zero or more than one newest record.
    #[error("bad entry count for plugin {plugin_name}: expected 1 winner, found {matches}")]
    Consistency { plugin_name: String, matches: usize },
}

/// Errors raised while loading deployment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn StoreError___duplicate___displays_plugin_and_version() {
        let err = StoreError::Duplicate {
            plugin_id: "foo".to_string(),
            version: "1.0".to_string(),
        };

        assert_eq!(err.to_string(), "bundle foo-1.0 is already published");
    }

    #[test]
    fn RegistryError___consistency___displays_counts() {
        let err = RegistryError::Consistency {
            plugin_name: "foo".to_string(),
            matches: 0,
        };

        let msg = err.to_string();
        assert!(msg.contains("foo"));
        assert!(msg.contains("found 0"));
    }
}
