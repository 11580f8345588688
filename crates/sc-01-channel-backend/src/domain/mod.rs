//! # Domain Layer
//!
//! Pure encoding logic with no I/O dependencies.

pub mod codec;
pub mod errors;
