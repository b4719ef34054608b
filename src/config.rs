//! Release configuration.

use crate::error::ConfigError;
use crate::version::MissingVersion;
use std::path::PathBuf;
use std::time::Duration;

/// Default container registry host
pub const DEFAULT_REGISTRY: &str = "ghcr.io";
/// Default registry namespace
pub const DEFAULT_NAMESPACE: &str = "miscord-dev";
/// Default prefix prepended to the component name in image names
pub const DEFAULT_IMAGE_PREFIX: &str = "tetrapod-";
/// Default build program
pub const DEFAULT_MAKE: &str = "make";
/// Default build target
pub const DEFAULT_TARGET: &str = "release";

/// Where the build command runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkdirMode {
    /// Inside `<root>/<component>`
    #[default]
    Component,
    /// Inside `<root>` itself
    Root,
}

/// Configuration for release operations
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Registry host (e.g. `ghcr.io`)
    pub registry: String,
    /// Registry namespace (e.g. `miscord-dev`)
    pub namespace: String,
    /// Prefix for image names, joined directly to the component
    pub image_prefix: String,
    /// Build program to run
    pub make_program: String,
    /// Build target passed as the first argument
    pub make_target: String,
    /// Repository root containing the component directories
    pub root: PathBuf,
    /// Working directory selection
    pub workdir: WorkdirMode,
    /// Behavior when the reference has no release tag
    pub missing_version: MissingVersion,
    /// Kill the build after this long, `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            make_program: DEFAULT_MAKE.to_string(),
            make_target: DEFAULT_TARGET.to_string(),
            root: PathBuf::from("."),
            workdir: WorkdirMode::default(),
            missing_version: MissingVersion::default(),
            timeout: None,
        }
    }
}

impl ReleaseConfig {
    /// Check that every value can produce a usable command
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("registry", &self.registry),
            ("namespace", &self.namespace),
            ("make", &self.make_program),
            ("target", &self.make_target),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        for (field, value) in [("registry", &self.registry), ("namespace", &self.namespace)] {
            if value.starts_with('/') || value.ends_with('/') {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: format!("'{}' must not start or end with '/'", value),
                });
            }
        }

        if self.image_prefix.contains([':', '/']) {
            return Err(ConfigError::Invalid {
                field: "image-prefix".to_string(),
                reason: format!("'{}' must not contain ':' or '/'", self.image_prefix),
            });
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::Invalid {
                field: "timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ReleaseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workdir, WorkdirMode::Component);
        assert_eq!(config.missing_version, MissingVersion::Error);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_empty_program_rejected() {
        let config = ReleaseConfig {
            make_program: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "make"));
    }

    #[test]
    fn test_trailing_slash_namespace_rejected() {
        let config = ReleaseConfig {
            namespace: "miscord-dev/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prefix_with_colon_rejected() {
        let config = ReleaseConfig {
            image_prefix: "tetra:".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ReleaseConfig {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
