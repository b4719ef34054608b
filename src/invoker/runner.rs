//! Process execution for release commands.

use super::ReleaseCommand;
use crate::error::InvokeError;
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

/// Grace period for reaping a killed build process
const KILL_REAP_TIMEOUT: Duration = Duration::from_secs(10);

/// How a finished command exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    /// Whether the command exited with code 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a planned command to completion
pub trait CommandRunner {
    /// Execute `command` and wait for it to exit
    fn run(
        &self,
        command: &ReleaseCommand,
    ) -> impl Future<Output = Result<RunStatus, InvokeError>> + Send;
}

/// Runs commands as child processes with inherited stdio
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner, optionally killing commands that outlive `timeout`
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ReleaseCommand) -> Result<RunStatus, InvokeError> {
        let program = which::which(&command.program).map_err(|e| InvokeError::ProgramNotFound {
            program: command.program.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("Resolved {} to {}", command.program, program.display());

        let mut cmd = Command::new(&program);
        cmd.args(&command.args)
            .current_dir(&command.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        // A timed build runs in its own process group so the kill reaches
        // everything make started, not just make.
        #[cfg(unix)]
        if self.timeout.is_some() {
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|source| InvokeError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let waited = match self.timeout {
            None => child.wait().await,
            Some(limit) => {
                let stop = tokio::select! {
                    waited = tokio::time::timeout(limit, child.wait()) => match waited {
                        Ok(waited) => Stop::Exited(waited),
                        Err(_elapsed) => Stop::TimedOut,
                    },
                    // The group no longer receives terminal Ctrl-C, so forward it.
                    Ok(()) = tokio::signal::ctrl_c() => Stop::Interrupted,
                };

                match stop {
                    Stop::Exited(waited) => waited,
                    Stop::TimedOut => {
                        log::warn!("'{}' timed out, terminating process group", command);
                        terminate(&mut child, command).await;
                        return Err(InvokeError::TimedOut {
                            command: command.to_string(),
                            timeout: limit,
                        });
                    }
                    Stop::Interrupted => {
                        log::warn!("Interrupted, terminating '{}'", command);
                        terminate(&mut child, command).await;
                        return Err(InvokeError::Interrupted {
                            command: command.to_string(),
                        });
                    }
                }
            }
        };

        let status = waited.map_err(|source| InvokeError::Spawn {
            command: command.to_string(),
            source,
        })?;

        Ok(RunStatus {
            code: status.code(),
        })
    }
}

enum Stop {
    Exited(std::io::Result<std::process::ExitStatus>),
    TimedOut,
    Interrupted,
}

/// Kill the child (and its process group on unix) and reap it
async fn terminate(child: &mut Child, command: &ReleaseCommand) {
    #[cfg(unix)]
    if let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
            log::warn!("Failed to kill process group of '{}': {}", command, e);
        }
    }

    if let Err(e) = child.start_kill() {
        log::debug!("Failed to kill '{}': {}", command, e);
    }
    let _ = tokio::time::timeout(KILL_REAP_TIMEOUT, child.wait()).await;
}
