use std::fmt;

use scroll::ctx::TryFromCtx;
use scroll::{Endian, Pread};

use crate::mac::MacAddress;
use crate::raw::{self, PackedWord};

/// Firmware version of a device, `X.Y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FirmwareVersion {
    /// The major version, `X`.
    pub major: u8,
    /// The minor version, `Y`.
    pub minor: u8,
}

impl fmt::Display for FirmwareVersion {
    // components are written as hex digits by catalog producers
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}.{:x}", self.major, self.minor)
    }
}

/// A single device entry of a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceRecord {
    /// Display name of the device.
    pub name: String,
    /// Hardware address of the device.
    pub mac: MacAddress,
    /// Firmware version running on the device.
    pub firmware: FirmwareVersion,
}

impl DeviceRecord {
    /// Firmware major version.
    pub fn major_version(&self) -> u8 {
        self.firmware.major
    }

    /// Firmware minor version.
    pub fn minor_version(&self) -> u8 {
        self.firmware.minor
    }
}

/// Decodes the name field up to its first nul byte.
///
/// A field without a terminator uses all of its bytes. Invalid UTF-8 is replaced.
fn decode_name(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len]).into_owned()
}

impl TryFromCtx<'_, Endian> for DeviceRecord {
    type Error = scroll::Error;

    fn try_from_ctx(data: &[u8], endian: Endian) -> Result<(Self, usize), Self::Error> {
        let name = data.pread_with::<&[u8]>(0, raw::NAME_SIZE)?;
        let word = data.pread_with::<u64>(raw::PACKED_OFFSET, endian)?;
        let packed = PackedWord::unpack(word);

        let record = DeviceRecord {
            name: decode_name(name),
            mac: MacAddress::from_packed(packed.mac),
            firmware: FirmwareVersion {
                major: packed.major_version,
                minor: packed.minor_version,
            },
        };

        Ok((record, raw::RECORD_SIZE))
    }
}
