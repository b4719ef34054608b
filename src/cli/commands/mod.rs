//! Command execution.

mod plan;
mod release;
mod version;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use plan::execute_plan;
use release::execute_release;
use version::execute_version;

/// Execute the command from parsed arguments and return the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(e) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&e.to_string());
        return Ok(e.exit_code());
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Release { .. } => execute_release(&args, &config).await,
        Command::Plan { .. } => execute_plan(&args, &config),
        Command::Version { .. } => execute_version(&args, &config),
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!("Command '{}' failed: {}", args.command.name(), e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(e.exit_code())
        }
    }
}
