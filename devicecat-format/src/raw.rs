//! The raw device catalog binary file format internals.
//!
//! All multi-byte integers are stored little-endian. The layout mirrors the naturally aligned C
//! structures of the producer, which is why three padding bytes follow the digest.

use scroll::Endian;

/// The magic value identifying a device catalog.
pub const CATALOG_SIGNATURE: u32 = 0xcafe_f00d;

/// The byte order of all integers in the file.
pub const CATALOG_ENDIAN: Endian = scroll::LE;

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Offset of the `u32` signature within the header.
pub const SIGNATURE_OFFSET: usize = 0;
/// Offset of the `u8` device count within the header.
pub const DEVICE_COUNT_OFFSET: usize = 4;
/// Offset of the digest within the header.
pub const DIGEST_OFFSET: usize = 5;
/// Offset of the `u64` timestamp within the header.
///
/// The timestamp is aligned to 8 bytes, leaving padding after the digest.
pub const TIMESTAMP_OFFSET: usize = 40;
/// Total size of the header. Device records start at this offset.
pub const HEADER_SIZE: usize = 48;

/// Size of the nul-terminated name field of a device record.
pub const NAME_SIZE: usize = 256;
/// Offset of the packed `u64` word within a device record.
pub const PACKED_OFFSET: usize = NAME_SIZE;
/// Total size of a device record.
pub const RECORD_SIZE: usize = 264;

/// Number of bits holding the hardware address in the packed word.
pub const MAC_BITS: u32 = 48;
/// Mask selecting the hardware address from the packed word.
pub const MAC_MASK: u64 = (1 << MAC_BITS) - 1;
/// Bit offset of the firmware major version in the packed word.
pub const MAJOR_VERSION_SHIFT: u32 = 48;
/// Bit offset of the firmware minor version in the packed word.
pub const MINOR_VERSION_SHIFT: u32 = 56;

/// The 64-bit word trailing each device record.
///
/// ```text
///  63        56 55        48 47                                  0
/// +------------+------------+------------------------------------+
/// |   minor    |   major    |                mac                 |
/// +------------+------------+------------------------------------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedWord {
    /// The 48-bit hardware address.
    pub mac: u64,
    /// Firmware major version.
    pub major_version: u8,
    /// Firmware minor version.
    pub minor_version: u8,
}

impl PackedWord {
    /// Splits a packed word into its fields.
    pub fn unpack(word: u64) -> Self {
        PackedWord {
            mac: word & MAC_MASK,
            major_version: (word >> MAJOR_VERSION_SHIFT) as u8,
            minor_version: (word >> MINOR_VERSION_SHIFT) as u8,
        }
    }

    /// Combines the fields into a packed word.
    ///
    /// Address bits above the low 48 are discarded.
    pub fn pack(&self) -> u64 {
        (self.mac & MAC_MASK)
            | (u64::from(self.major_version) << MAJOR_VERSION_SHIFT)
            | (u64::from(self.minor_version) << MINOR_VERSION_SHIFT)
    }
}
