//! Structured build command.

use crate::config::{ReleaseConfig, WorkdirMode};
use crate::image::{Component, ImageReference};
use crate::version::ImageTag;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The build invocation for one component, as a program and argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCommand {
    /// Program to execute
    pub program: String,
    /// Arguments, passed without a shell
    pub args: Vec<String>,
    /// Directory the program runs in
    pub workdir: PathBuf,
    /// Image reference passed as `IMG=`
    pub image: ImageReference,
}

impl ReleaseCommand {
    /// Plan `make <target> IMG=<image>` for `component`.
    ///
    /// Pure: nothing is checked on disk and nothing runs.
    pub fn plan(config: &ReleaseConfig, component: &Component, tag: ImageTag) -> Self {
        let image = ImageReference::new(config, component, tag);

        let workdir = match config.workdir {
            WorkdirMode::Component => config.root.join(component.as_str()),
            WorkdirMode::Root => config.root.clone(),
        };

        Self {
            program: config.make_program.clone(),
            args: vec![config.make_target.clone(), format!("IMG={}", image)],
            workdir,
            image,
        }
    }
}

impl fmt::Display for ReleaseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

// Display only; the command itself never goes through a shell.
fn quote(word: &str) -> String {
    if !word.is_empty() && !word.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::extract_version;
    use std::path::Path;

    fn tag(reference: &str) -> ImageTag {
        extract_version(reference).map(ImageTag::from).unwrap_or(ImageTag::Undefined)
    }

    #[test]
    fn test_plan_component_workdir() {
        let config = ReleaseConfig {
            root: PathBuf::from("/repo"),
            ..Default::default()
        };
        let component = Component::parse("foo").unwrap();
        let command = ReleaseCommand::plan(&config, &component, tag("refs/tags/v1.2.3"));

        assert_eq!(command.program, "make");
        assert_eq!(
            command.args,
            vec!["release", "IMG=ghcr.io/miscord-dev/tetrapod-foo:v1.2.3"]
        );
        assert_eq!(command.workdir, Path::new("/repo/foo"));
        assert_eq!(
            command.to_string(),
            "make release IMG=ghcr.io/miscord-dev/tetrapod-foo:v1.2.3"
        );
    }

    #[test]
    fn test_plan_in_place_workdir() {
        let config = ReleaseConfig {
            root: PathBuf::from("/repo"),
            workdir: WorkdirMode::Root,
            ..Default::default()
        };
        let component = Component::parse("foo").unwrap();
        let command = ReleaseCommand::plan(&config, &component, tag("v1.2.3"));
        assert_eq!(command.workdir, Path::new("/repo"));
    }

    #[test]
    fn test_plan_undefined_tag() {
        let component = Component::parse("bar").unwrap();
        let command = ReleaseCommand::plan(&ReleaseConfig::default(), &component, tag("main"));
        assert_eq!(
            command.args[1],
            "IMG=ghcr.io/miscord-dev/tetrapod-bar:undefined"
        );
    }

    #[test]
    fn test_plan_custom_program_and_target() {
        let config = ReleaseConfig {
            make_program: "gmake".to_string(),
            make_target: "docker-release".to_string(),
            ..Default::default()
        };
        let component = Component::parse("tetrad").unwrap();
        let command = ReleaseCommand::plan(&config, &component, tag("v0.9.1"));
        assert_eq!(
            command.to_string(),
            "gmake docker-release IMG=ghcr.io/miscord-dev/tetrapod-tetrad:v0.9.1"
        );
    }

    #[test]
    fn test_display_quotes_whitespace() {
        assert_eq!(quote("my make"), "'my make'");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_serialize_json() {
        let component = Component::parse("foo").unwrap();
        let command = ReleaseCommand::plan(&ReleaseConfig::default(), &component, tag("v1.2.3"));
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["program"], "make");
        assert_eq!(json["image"], "ghcr.io/miscord-dev/tetrapod-foo:v1.2.3");
        assert_eq!(json["args"][0], "release");
    }
}
