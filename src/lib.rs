//! # tetrapod-release
//!
//! Release helper for the tetrapod components.
//!
//! Extracts the `vMAJOR.MINOR.PATCH` tag from a source-control reference
//! and runs the component's release target with the matching image
//! reference:
//!
//! ```text
//! make release IMG=ghcr.io/miscord-dev/tetrapod-<component>:<version>
//! ```
//!
//! ## Usage
//!
//! ```bash
//! GITHUB_REF=refs/tags/v1.2.3 tetrapod-release release tetrad
//! tetrapod-release plan controlplane --ref refs/tags/v1.2.3
//! tetrapod-release version --json
//! ```
//!
//! The library takes the reference as a parameter; only the CLI reads it
//! from the environment.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod invoker;
pub mod version;

pub use cli::Args;
pub use config::{ReleaseConfig, WorkdirMode};
pub use error::{ReleaseError, Result};
pub use image::{Component, ImageReference};
pub use invoker::{
    CommandRunner, ProcessRunner, ReleaseCommand, ReleaseInvoker, ReleaseOutcome, RunStatus,
};
pub use version::{ImageTag, MissingVersion, ReleaseTag, extract_version, resolve_tag};
