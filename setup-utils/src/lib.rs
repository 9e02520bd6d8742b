//! Shared utilities for the SRS generation ceremony crates: the common error
//! taxonomy, BLAKE2b transcript hashing, group element (de)serialization
//! helpers and pairing-based ratio checks.

pub mod elements;
pub mod errors;
pub mod hash;
pub mod ratio;

pub use elements::*;
pub use errors::*;
pub use hash::*;
pub use ratio::*;

pub type Result<T> = core::result::Result<T, Error>;
