//! Pattern matching for base-58 addresses.
//!
//! Only prefix matching is supported: the search looks for an address whose
//! base-58 rendering starts with a chosen string.

mod pattern;

pub use pattern::Pattern;
