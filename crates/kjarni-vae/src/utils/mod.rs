//! Utility modules

pub mod levenshtein;
pub mod linear_algebra;
pub mod masks;

pub use masks::*;
