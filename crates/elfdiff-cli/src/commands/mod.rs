//! Command implementations.

pub mod compare;
pub mod completion;
