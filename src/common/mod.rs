//! Common types, traits, and error definitions for grid_planning
//!
//! This module provides the foundational building blocks shared by
//! every planner in this crate.

pub mod types;
pub mod traits;
pub mod error;
pub mod trace;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use trace::*;
