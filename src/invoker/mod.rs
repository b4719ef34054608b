//! Release invocation.
//!
//! Turns a component name and a source-control reference into a
//! [`ReleaseCommand`] and runs it through a [`CommandRunner`]. The build
//! tool's output goes straight to the operator; only its exit status comes
//! back.

mod command;
mod runner;

pub use command::ReleaseCommand;
pub use runner::{CommandRunner, ProcessRunner, RunStatus};

use crate::config::ReleaseConfig;
use crate::error::{InvokeError, Result};
use crate::image::{Component, ImageReference};
use crate::version;

/// Result of a successful release
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// Command that ran
    pub command: ReleaseCommand,
    /// Image that was released
    pub image: ImageReference,
}

/// Plans and runs release commands for components
#[derive(Debug)]
pub struct ReleaseInvoker<R> {
    config: ReleaseConfig,
    runner: R,
}

impl ReleaseInvoker<ProcessRunner> {
    /// Invoker that spawns real processes, honoring the configured timeout
    pub fn with_process_runner(config: ReleaseConfig) -> Result<Self> {
        let runner = ProcessRunner::new(config.timeout);
        Self::new(config, runner)
    }
}

impl<R: CommandRunner> ReleaseInvoker<R> {
    /// Create an invoker after validating `config`
    pub fn new(config: ReleaseConfig, runner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    /// Plan the release of `component` for `reference` without running anything
    pub fn plan(&self, component: &str, reference: &str) -> Result<ReleaseCommand> {
        let component = Component::parse(component)?;
        let tag = version::resolve_tag(reference, self.config.missing_version)?;
        let command = ReleaseCommand::plan(&self.config, &component, tag);
        log::debug!(
            "Planned '{}' in {} for {}",
            command,
            command.workdir.display(),
            component
        );
        Ok(command)
    }

    /// Release `component` for `reference`.
    ///
    /// Runs the build command once and waits for it. Any failure, including a
    /// non-zero exit, is returned as an error; nothing is retried.
    pub async fn release(&self, component: &str, reference: &str) -> Result<ReleaseOutcome> {
        let command = self.plan(component, reference)?;

        if !command.workdir.is_dir() {
            return Err(InvokeError::WorkdirMissing {
                path: command.workdir.clone(),
            }
            .into());
        }

        log::info!("Running '{}' in {}", command, command.workdir.display());
        let status = self.runner.run(&command).await?;

        if !status.success() {
            return Err(InvokeError::CommandFailed {
                command: command.to_string(),
                code: status.code,
            }
            .into());
        }

        log::info!("Released {}", command.image);
        let image = command.image.clone();
        Ok(ReleaseOutcome { command, image })
    }
}
