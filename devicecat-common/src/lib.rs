//! Common functionality for `devicecat`.
//!
//! This crate exposes:
//!
//!  - [`ByteView`]: Gives access to catalog bytes in-memory or on the file system.
//!  - [`host_byte_order`]: The byte order of the running machine.

#![warn(missing_docs)]

mod byteview;
mod endian;

pub use crate::byteview::*;
pub use crate::endian::*;

pub use scroll::Endian;
