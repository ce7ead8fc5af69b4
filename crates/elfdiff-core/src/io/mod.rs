//! Random-access I/O used across archive lookup and object decoding.
//!
//! This module provides the positional read capability and the wrappers
//! built on top of it.

pub mod read_at;
pub mod window;

// Re-export main types for convenience
pub use read_at::ReadAt;
pub use read_at::ReadAtCursor;
pub use window::ByteWindow;
