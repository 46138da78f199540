//! Common types, traits, and error definitions for pid_path_tracking
//!
//! This module provides the foundational building blocks shared by the
//! vehicle model and the path tracker.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
