//! Unix `ar` archive support.
//!
//! Only lookup is implemented: find a member by name and expose its content
//! as a [`ByteWindow`](crate::io::ByteWindow). Long names use the GNU
//! convention of a `//` member holding `/`-terminated names referenced as
//! `/<offset>` from the member header.

pub mod header;
pub mod locator;

pub use header::MemberHeader;
pub use locator::locate;
pub use locator::locate_in;
