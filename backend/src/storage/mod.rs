//! # Storage Module
//!
//! Storage traits, the flat-file implementation behind them and the
//! storage error type.

pub mod csv;
pub mod error;
pub mod traits;

pub use error::StorageError;
pub use traits::*;
