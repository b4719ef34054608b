//! Version command implementation.

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{Result, VersionError};
use crate::version::extract_version;
use serde::Serialize;

#[derive(Serialize)]
struct VersionReport<'a> {
    reference: &'a str,
    tag: &'a str,
    semver: Option<String>,
}

/// Execute version command
pub(super) fn execute_version(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let Command::Version { json } = &args.command else {
        unreachable!("execute_version called with non-Version command");
    };

    let reference = args.reference();
    config.verbose_println(&format!("Reference: {}", reference));

    let tag = extract_version(&reference).ok_or_else(|| VersionError::NotFound {
        reference: reference.clone(),
    })?;

    if *json {
        // Leading-zero tags still match; they just have no semver form.
        let semver = match tag.to_semver() {
            Ok(version) => Some(version.to_string()),
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        };
        let report = VersionReport {
            reference: &reference,
            tag: tag.as_str(),
            semver,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", tag);
    }

    Ok(())
}
