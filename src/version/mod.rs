//! Release version extraction.
//!
//! Finds the `vMAJOR.MINOR.PATCH` tag in a source-control reference such as
//! `refs/tags/v1.2.3` and decides what happens when there is none.

mod tag;

pub use tag::{ImageTag, ReleaseTag, UNDEFINED_TAG};

use crate::error::VersionError;
use regex::Regex;
use std::sync::LazyLock;

/// Environment variable holding the reference in GitHub Actions
pub const DEFAULT_REF_VAR: &str = "GITHUB_REF";

static RELEASE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v[0-9]+\.[0-9]+\.[0-9]+").expect("release tag regex is valid")
});

/// What to do when the reference carries no release tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingVersion {
    /// Fail with [`VersionError::NotFound`]
    #[default]
    Error,
    /// Continue with the `undefined` placeholder tag
    Undefined,
}

/// Extract the first release tag from `reference`, scanning left to right.
///
/// The match is unanchored, so `refs/tags/v1.0.0-rc-v2.0.0` yields `v1.0.0`.
pub fn extract_version(reference: &str) -> Option<ReleaseTag> {
    RELEASE_TAG_RE
        .find(reference)
        .map(|m| ReleaseTag::new(m.as_str()))
}

/// Read the reference from the environment variable `var`.
///
/// An unset variable reads as the text `undefined`, which never matches.
/// Bytes that are not UTF-8 are replaced, so a tag elsewhere in the value
/// is still found.
pub fn reference_from_env(var: &str) -> String {
    std::env::var_os(var)
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNDEFINED_TAG.to_string())
}

/// Resolve the image tag for `reference` under `policy`.
pub fn resolve_tag(reference: &str, policy: MissingVersion) -> Result<ImageTag, VersionError> {
    match (extract_version(reference), policy) {
        (Some(tag), _) => Ok(ImageTag::Release(tag)),
        (None, MissingVersion::Undefined) => {
            log::warn!(
                "No version tag in reference '{}', using '{}'",
                reference,
                UNDEFINED_TAG
            );
            Ok(ImageTag::Undefined)
        }
        (None, MissingVersion::Error) => Err(VersionError::NotFound {
            reference: reference.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(reference: &str) -> Option<String> {
        extract_version(reference).map(|t| t.as_str().to_string())
    }

    #[test]
    fn test_extract_from_tag_ref() {
        assert_eq!(extracted("refs/tags/v1.2.3").as_deref(), Some("v1.2.3"));
    }

    #[test]
    fn test_extract_embedded_anywhere() {
        assert_eq!(extracted("v10.20.30").as_deref(), Some("v10.20.30"));
        assert_eq!(extracted("release-v0.0.1-rc.1").as_deref(), Some("v0.0.1"));
        assert_eq!(extracted("refs/tags/tetrad/v2.3.4").as_deref(), Some("v2.3.4"));
    }

    #[test]
    fn test_extract_first_match_wins() {
        assert_eq!(
            extracted("refs/tags/v1.0.0-rc-v2.0.0").as_deref(),
            Some("v1.0.0")
        );
    }

    #[test]
    fn test_extract_no_match() {
        for reference in ["main", "refs/heads/main", "v1.2", "1.2.3", "V1.2.3", "undefined", ""] {
            assert_eq!(extracted(reference), None, "reference: {reference}");
        }
    }

    #[test]
    fn test_extract_ascii_digits_only() {
        // Arabic-Indic digits are Unicode \d but not release versions.
        assert_eq!(extracted("v\u{661}.\u{662}.\u{663}"), None);
    }

    #[test]
    fn test_resolve_tag_missing_is_error_by_default() {
        let err = resolve_tag("refs/heads/main", MissingVersion::default()).unwrap_err();
        assert!(matches!(err, VersionError::NotFound { ref reference } if reference == "refs/heads/main"));
    }

    #[test]
    fn test_resolve_tag_missing_undefined_policy() {
        let tag = resolve_tag("main", MissingVersion::Undefined).unwrap();
        assert_eq!(tag, ImageTag::Undefined);
    }

    #[test]
    fn test_resolve_tag_found_ignores_policy() {
        let tag = resolve_tag("refs/tags/v3.1.4", MissingVersion::Undefined).unwrap();
        assert_eq!(tag.as_str(), "v3.1.4");
    }

    #[test]
    fn test_reference_from_unset_env() {
        let reference = reference_from_env("TETRAPOD_RELEASE_TEST_UNSET_REF_VAR");
        assert_eq!(reference, "undefined");
        assert!(extract_version(&reference).is_none());
    }
}
