//! # Core Module
//!
//! This module provides the primitives shared by every part of the world: the
//! thread-safe resource container handed to worker tasks and the error type for
//! startup configuration.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking
//! - `ConfigError`: Failures while loading and validating configuration

pub mod error;
pub mod mt_resource;

pub use error::ConfigError;
pub use mt_resource::MtResource;
