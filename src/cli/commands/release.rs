//! Release command implementation.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::invoker::ReleaseInvoker;

/// Execute release command
pub(super) async fn execute_release(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Release { component, dry_run } = &args.command else {
        unreachable!("execute_release called with non-Release command");
    };

    let invoker = ReleaseInvoker::with_process_runner(args.release_config()?)?;
    let reference = args.reference();
    config.verbose_println(&format!("Reference: {}", reference));

    if *dry_run {
        let command = invoker.plan(component, &reference)?;
        if command.image.tag().is_undefined() {
            config.warning_println("No version tag found, image will be tagged 'undefined'");
        }
        config.info_println(&format!("Would run in {}:", command.workdir.display()));
        config.indent(&command.to_string());
        return Ok(());
    }

    config.info_println(&format!("Releasing {}...", component));
    let outcome = invoker.release(component, &reference).await?;

    if outcome.image.tag().is_undefined() {
        config.warning_println("Released without a version tag ('undefined')");
    }
    config.success_println(&format!("Released {}", outcome.image));
    Ok(())
}
