//! Decoding and verification of device catalogs.
//!
//! A device catalog is a binary file listing network-attached smart devices. It consists of a
//! fixed-size header followed by a number of fixed-size device records. The header stores a
//! SHA-256 digest over exactly the bytes of those records.
//!
//! # Structure of a Device Catalog
//!
//! All integers are little-endian.
//!
//! ```text
//! header (48 bytes)
//!   0   u32      signature, 0xcafef00d
//!   4   u8       device count
//!   5   [u8; 32] SHA-256 digest of the record region
//!   37  [u8; 3]  padding
//!   40  u64      timestamp
//! device record (264 bytes, repeated `device count` times)
//!   0   [u8; 256] nul-terminated name
//!   256 u64       mac (bits 0..48), major version (48..56), minor version (56..64)
//! ```
//!
//! Any bytes after the last declared record are not covered by the digest and are ignored.
//!
//! # Pipeline
//!
//! 1. [`decode`] validates the buffer length against the header and decodes all records.
//! 2. [`verify`] hashes the record region and compares it with the stored digest.
//!
//! [`DeviceCatalog::parse`] runs both steps and only yields records if both succeed.
//!
//! # Features
//!
//! - `serde` (optional): Implements `serde::Serialize` for the decoded types. Addresses and
//!   digests serialize as strings.

#![warn(missing_docs)]

mod catalog;
mod device;
mod error;
mod header;
mod mac;
pub mod raw;
mod verify;

pub use crate::catalog::*;
pub use crate::device::*;
pub use crate::error::*;
pub use crate::header::*;
pub use crate::mac::*;
pub use crate::verify::*;
