//! Command line argument parsing and validation.

use crate::config::{
    DEFAULT_IMAGE_PREFIX, DEFAULT_MAKE, DEFAULT_NAMESPACE, DEFAULT_REGISTRY, DEFAULT_TARGET,
    ReleaseConfig, WorkdirMode,
};
use crate::error::{CliError, Result};
use crate::version::{self, DEFAULT_REF_VAR, MissingVersion};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Release helper for tetrapod component images
#[derive(Parser, Debug)]
#[command(
    name = "tetrapod-release",
    version,
    about = "Build and publish a component image for the current release tag",
    long_about = "Build and publish a component image for the current release tag.

The version comes from the vMAJOR.MINOR.PATCH tag in the source-control
reference ($GITHUB_REF by default). For component 'tetrad' and reference
refs/tags/v1.2.3 the release runs, inside ./tetrad:

  make release IMG=ghcr.io/miscord-dev/tetrapod-tetrad:v1.2.3

Usage:
  tetrapod-release release tetrad
  tetrapod-release release tetrad --ref refs/tags/v1.2.3 --dry-run
  tetrapod-release plan controlplane --json
  tetrapod-release version"
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Source-control reference to take the version from (overrides --ref-var)
    #[arg(long = "ref", value_name = "REF", global = true)]
    pub reference: Option<String>,

    /// Environment variable holding the reference
    #[arg(long, value_name = "VAR", default_value = DEFAULT_REF_VAR, global = true)]
    pub ref_var: String,

    /// Container registry host
    #[arg(long, env = "TETRAPOD_REGISTRY", default_value = DEFAULT_REGISTRY, global = true)]
    pub registry: String,

    /// Registry namespace
    #[arg(long, env = "TETRAPOD_NAMESPACE", default_value = DEFAULT_NAMESPACE, global = true)]
    pub namespace: String,

    /// Prefix joined to the component name to form the image name
    #[arg(long, env = "TETRAPOD_IMAGE_PREFIX", default_value = DEFAULT_IMAGE_PREFIX, global = true)]
    pub image_prefix: String,

    /// Build program
    #[arg(long, env = "TETRAPOD_MAKE", default_value = DEFAULT_MAKE, global = true)]
    pub make: String,

    /// Build target
    #[arg(long, default_value = DEFAULT_TARGET, global = true)]
    pub target: String,

    /// Repository root containing the component directories [default: current directory]
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Run the build from the root instead of the component directory
    #[arg(long, global = true)]
    pub in_place: bool,

    /// Release with the tag 'undefined' when the reference has no version
    #[arg(long, global = true)]
    pub allow_untagged: bool,

    /// Kill the build after this many seconds
    #[arg(long, env = "TETRAPOD_RELEASE_TIMEOUT", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Show extra detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and requested output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build and publish the image for a component
    Release {
        /// Component directory and image name suffix
        component: String,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the command a release would run
    Plan {
        /// Component directory and image name suffix
        component: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the version tag found in the reference
    Version {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Subcommand name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Release { .. } => "release",
            Command::Plan { .. } => "plan",
            Command::Version { .. } => "version",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.reference.is_none() && self.ref_var.trim().is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "--ref-var must name an environment variable".to_string(),
            }
            .into());
        }

        if self.timeout == Some(0) {
            return Err(CliError::InvalidArguments {
                reason: "--timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Reference to extract the version from.
    ///
    /// `--ref` wins; otherwise the variable named by `--ref-var` is read.
    pub fn reference(&self) -> String {
        match &self.reference {
            Some(reference) => reference.clone(),
            None => version::reference_from_env(&self.ref_var),
        }
    }

    /// Build the release configuration
    pub fn release_config(&self) -> Result<ReleaseConfig> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        Ok(ReleaseConfig {
            registry: self.registry.clone(),
            namespace: self.namespace.clone(),
            image_prefix: self.image_prefix.clone(),
            make_program: self.make.clone(),
            make_target: self.target.clone(),
            root,
            workdir: if self.in_place {
                WorkdirMode::Root
            } else {
                WorkdirMode::Component
            },
            missing_version: if self.allow_untagged {
                MissingVersion::Undefined
            } else {
                MissingVersion::Error
            },
            timeout: self.timeout.map(Duration::from_secs),
        })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print informational message
    pub fn info_println(&self, message: &str) {
        self.output.info(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tetrapod-release").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_release_defaults() {
        let args = parse(&["release", "foo", "--ref", "refs/tags/v1.2.3", "--root", "/repo"]);
        assert!(matches!(
            args.command,
            Command::Release { ref component, dry_run: false } if component == "foo"
        ));
        assert_eq!(args.reference(), "refs/tags/v1.2.3");

        let config = args.release_config().unwrap();
        assert_eq!(config.root, PathBuf::from("/repo"));
        assert_eq!(config.make_target, "release");
        assert_eq!(config.workdir, WorkdirMode::Component);
        assert_eq!(config.missing_version, MissingVersion::Error);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&[
            "plan",
            "bar",
            "--in-place",
            "--allow-untagged",
            "--timeout",
            "60",
            "--make",
            "gmake",
        ]);
        let config = args.release_config().unwrap();
        assert_eq!(config.workdir, WorkdirMode::Root);
        assert_eq!(config.missing_version, MissingVersion::Undefined);
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.make_program, "gmake");
    }

    #[test]
    fn test_reference_from_named_variable() {
        let args = parse(&["version", "--ref-var", "TETRAPOD_RELEASE_TEST_MISSING_VAR"]);
        assert_eq!(args.reference(), "undefined");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let args = parse(&["version", "--timeout", "0"]);
        let err = args.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::error::ReleaseError::Cli(CliError::InvalidArguments { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Args::try_parse_from(["tetrapod-release", "-v", "-q", "version"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_names() {
        assert_eq!(parse(&["version"]).command.name(), "version");
        assert_eq!(parse(&["plan", "x"]).command.name(), "plan");
    }
}
