//! Plan command implementation.
//!
//! Prints the build command a release would run, without running it.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::invoker::{ProcessRunner, ReleaseInvoker};

/// Execute plan command
pub(super) fn execute_plan(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Plan { component, json } = &args.command else {
        unreachable!("execute_plan called with non-Plan command");
    };

    let invoker = ReleaseInvoker::new(args.release_config()?, ProcessRunner::default())?;
    let command = invoker.plan(component, &args.reference())?;

    if command.image.tag().is_undefined() {
        config.warning_println("No version tag found, image will be tagged 'undefined'");
    }

    if *json {
        println!("{}", serde_json::to_string_pretty(&command)?);
    } else {
        config.verbose_println(&format!("Working directory: {}", command.workdir.display()));
        println!("{}", command);
    }

    Ok(())
}
