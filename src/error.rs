//! Error types for tetrapod-release operations.
//!
//! Every failure a release can hit is classified here, with actionable
//! messages and recovery suggestions for the operator.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for tetrapod-release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all tetrapod-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Version extraction errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Component identifier errors
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Build tool invocation errors
    #[error("Release command error: {0}")]
    Invoke(#[from] InvokeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Version extraction errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// The reference holds no `vMAJOR.MINOR.PATCH` tag
    #[error("No version tag found in reference '{reference}'")]
    NotFound {
        /// Reference that was searched
        reference: String,
    },

    /// Tag matched the pattern but is not valid semver
    #[error("Failed to parse version '{tag}': {source}")]
    Semver {
        /// Tag text
        tag: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },
}

/// Component identifier errors
#[derive(Error, Debug)]
pub enum ComponentError {
    /// Component identifier is empty
    #[error("Component name must not be empty")]
    Empty,

    /// Component identifier cannot be used as a directory and image name
    #[error("Invalid component name '{component}': {reason}")]
    Invalid {
        /// Component identifier
        component: String,
        /// Reason for the error
        reason: String,
    },
}

/// Errors running the external build command
#[derive(Error, Debug)]
pub enum InvokeError {
    /// Build program is not on PATH
    #[error("Program '{program}' not found: {reason}")]
    ProgramNotFound {
        /// Program name
        program: String,
        /// Reason for the error
        reason: String,
    },

    /// Working directory for the command does not exist
    #[error("Working directory {} does not exist", path.display())]
    WorkdirMissing {
        /// Expected directory
        path: PathBuf,
    },

    /// Process could not be started or waited on
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        /// Command line that failed
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Process exited unsuccessfully
    #[error("'{command}' failed with {}", describe_code(*code))]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// Process exceeded the configured timeout and was killed
    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut {
        /// Command line that timed out
        command: String,
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// Operator interrupted a timed build, which was then killed
    #[error("'{command}' was interrupted")]
    Interrupted {
        /// Command line that was interrupted
        command: String,
    },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value is unusable
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        /// Field name
        field: String,
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Version(VersionError::NotFound { .. }) => vec![
                "Run the release from a tag push (GITHUB_REF=refs/tags/vX.Y.Z)".to_string(),
                "Pass the reference explicitly: --ref refs/tags/v1.2.3".to_string(),
                "Use --allow-untagged to publish with the legacy 'undefined' tag".to_string(),
            ],
            ReleaseError::Invoke(InvokeError::ProgramNotFound { program, .. }) => vec![
                format!("Install '{}' or add it to PATH", program),
                "Point --make (or TETRAPOD_MAKE) at another build program".to_string(),
            ],
            ReleaseError::Invoke(InvokeError::WorkdirMissing { path }) => vec![
                format!("Check that the component directory {} exists", path.display()),
                "Use --root to point at the repository root".to_string(),
                "Use --in-place to run the build from the root directory".to_string(),
            ],
            ReleaseError::Invoke(InvokeError::TimedOut { .. }) => vec![
                "Increase --timeout or remove it to wait indefinitely".to_string(),
            ],
            ReleaseError::Component(_) => vec![
                "Use the component's directory name, e.g. 'tetrad' or 'controlplane'".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error.
    ///
    /// A failed build command exits with the command's own code so callers
    /// see exactly what the build tool reported. Invalid arguments exit 2,
    /// like clap's own usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Invoke(InvokeError::CommandFailed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            ReleaseError::Invoke(InvokeError::Interrupted { .. }) => 130,
            ReleaseError::Cli(CliError::InvalidArguments { .. }) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_keeps_exit_code() {
        let err = ReleaseError::from(InvokeError::CommandFailed {
            command: "make release".to_string(),
            code: Some(2),
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("exit code 2"));
    }

    #[test]
    fn test_signal_termination_exits_one() {
        let err = ReleaseError::from(InvokeError::CommandFailed {
            command: "make release".to_string(),
            code: None,
        });
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_invalid_arguments_exit_two() {
        let err = ReleaseError::from(CliError::InvalidArguments {
            reason: "--timeout must be greater than zero".to_string(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_timeout_message_keeps_subsecond_precision() {
        let err = InvokeError::TimedOut {
            command: "make release".to_string(),
            timeout: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "'make release' timed out after 200ms");
    }

    #[test]
    fn test_missing_version_has_suggestions() {
        let err = ReleaseError::from(VersionError::NotFound {
            reference: "main".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
        assert!(err
            .recovery_suggestions()
            .iter()
            .any(|s| s.contains("--allow-untagged")));
    }
}
