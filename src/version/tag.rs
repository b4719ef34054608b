//! Release tag types.

use crate::error::VersionError;
use serde::Serialize;
use std::fmt;

/// Placeholder used in place of a version when untagged releases are allowed
pub const UNDEFINED_TAG: &str = "undefined";

/// A `vMAJOR.MINOR.PATCH` tag extracted from a reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReleaseTag(String);

impl ReleaseTag {
    pub(super) fn new(tag: &str) -> Self {
        Self(tag.to_string())
    }

    /// Tag text, including the leading `v`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the tag as a semantic version.
    ///
    /// Tags with leading zeros (`v01.2.3`) match the release pattern but are
    /// rejected here, since semver forbids them.
    pub fn to_semver(&self) -> Result<semver::Version, VersionError> {
        let bare = self.0.strip_prefix('v').unwrap_or(&self.0);
        semver::Version::parse(bare).map_err(|source| VersionError::Semver {
            tag: self.0.clone(),
            source,
        })
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag segment of an image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageTag {
    /// A real release tag
    Release(ReleaseTag),
    /// No tag was found and the legacy placeholder is used
    Undefined,
}

impl ImageTag {
    /// Text placed after the `:` in the image reference
    pub fn as_str(&self) -> &str {
        match self {
            ImageTag::Release(tag) => tag.as_str(),
            ImageTag::Undefined => UNDEFINED_TAG,
        }
    }

    /// Whether this is the legacy placeholder
    pub fn is_undefined(&self) -> bool {
        matches!(self, ImageTag::Undefined)
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ReleaseTag> for ImageTag {
    fn from(tag: ReleaseTag) -> Self {
        ImageTag::Release(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semver_parse() {
        let version = ReleaseTag::new("v1.22.3").to_semver().unwrap();
        assert_eq!(version, semver::Version::new(1, 22, 3));
    }

    #[test]
    fn test_semver_rejects_leading_zero() {
        let err = ReleaseTag::new("v01.2.3").to_semver().unwrap_err();
        assert!(matches!(err, VersionError::Semver { ref tag, .. } if tag == "v01.2.3"));
    }

    #[test]
    fn test_image_tag_text() {
        assert_eq!(ImageTag::from(ReleaseTag::new("v0.1.0")).as_str(), "v0.1.0");
        assert_eq!(ImageTag::Undefined.to_string(), "undefined");
        assert!(ImageTag::Undefined.is_undefined());
    }
}
