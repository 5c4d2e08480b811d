//! Core domain models for a release
//!
//! This module defines the configuration, manifest access, step sequence and
//! run state of the release pipeline.

pub mod config;
pub mod error;
pub mod manifest;
pub mod message;
pub mod state;
pub mod step;

pub use config::{ReleaseConfig, ReleaseOptions};
pub use error::{ConfigError, ReleaseError};
pub use manifest::Manifest;
pub use message::MessageTemplate;
pub use state::*;
pub use step::*;
