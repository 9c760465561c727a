//! Domain vocabulary and wire protocol shared by the seimei handan client crates.

pub mod domain;
pub mod error;
pub mod protocol;
