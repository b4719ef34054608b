//! Component names and container image references.

use crate::config::ReleaseConfig;
use crate::error::ComponentError;
use crate::version::ImageTag;
use serde::Serialize;
use std::fmt;

/// A releasable component: a subdirectory of the repository with its own image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Component(String);

impl Component {
    /// Validate a component identifier.
    ///
    /// The name is used verbatim as a directory name and inside the image
    /// reference, so it must be a single path segment without `:` or
    /// whitespace.
    pub fn parse(name: &str) -> Result<Self, ComponentError> {
        if name.is_empty() {
            return Err(ComponentError::Empty);
        }

        let invalid = |reason: &str| ComponentError::Invalid {
            component: name.to_string(),
            reason: reason.to_string(),
        };

        if name == "." || name == ".." {
            return Err(invalid("must name a subdirectory"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("must not contain path separators"));
        }
        if name.contains(':') {
            return Err(invalid("must not contain ':'"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }

        Ok(Self(name.to_string()))
    }

    /// Component name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified image reference, `registry/namespace/<prefix><component>:<tag>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    registry: String,
    namespace: String,
    name: String,
    tag: ImageTag,
}

impl ImageReference {
    /// Compose the image reference for `component` from the configured prefix
    pub fn new(config: &ReleaseConfig, component: &Component, tag: ImageTag) -> Self {
        Self {
            registry: config.registry.clone(),
            namespace: config.namespace.clone(),
            name: format!("{}{}", config.image_prefix, component),
            tag,
        }
    }

    /// Image repository without the tag
    pub fn repository(&self) -> String {
        format!("{}/{}/{}", self.registry, self.namespace, self.name)
    }

    /// Tag segment
    pub fn tag(&self) -> &ImageTag {
        &self.tag
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository(), self.tag)
    }
}

impl Serialize for ImageReference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
