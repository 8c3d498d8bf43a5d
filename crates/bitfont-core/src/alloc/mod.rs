//! Hash collections used across the bitfont crates.
//!
//! Code-point keyed maps are small and hot during layout, so they use AHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet};
