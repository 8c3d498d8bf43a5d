//! Bitfont Core
//!
//! Shared utilities for the bitfont crates: logging setup, math types,
//! profiling hooks and hash collections.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
