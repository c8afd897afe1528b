use scroll::ctx::TryFromCtx;
use scroll::{Endian, Pread};

use crate::raw::{self, DIGEST_SIZE};
use crate::verify::Digest;

/// The fixed-size header at the start of a device catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    /// The magic value identifying the format, see [`CATALOG_SIGNATURE`](raw::CATALOG_SIGNATURE).
    pub signature: u32,
    /// Number of device records following the header.
    pub device_count: u8,
    /// SHA-256 digest of the record region.
    pub digest: Digest,
    /// Generation time in seconds since the Unix epoch.
    pub timestamp: u64,
}

impl Header {
    /// Returns `true` if the header carries the catalog signature.
    pub fn has_valid_signature(&self) -> bool {
        self.signature == raw::CATALOG_SIGNATURE
    }

    /// Number of bytes covered by the declared device records.
    pub fn record_region_len(&self) -> usize {
        usize::from(self.device_count) * raw::RECORD_SIZE
    }
}

impl TryFromCtx<'_, Endian> for Header {
    type Error = scroll::Error;

    fn try_from_ctx(data: &[u8], endian: Endian) -> Result<(Self, usize), Self::Error> {
        let signature = data.pread_with::<u32>(raw::SIGNATURE_OFFSET, endian)?;
        let device_count = data.pread_with::<u8>(raw::DEVICE_COUNT_OFFSET, endian)?;

        let mut digest = [0; DIGEST_SIZE];
        let bytes = data.pread_with::<&[u8]>(raw::DIGEST_OFFSET, DIGEST_SIZE)?;
        digest.copy_from_slice(bytes);

        let timestamp = data.pread_with::<u64>(raw::TIMESTAMP_OFFSET, endian)?;

        let header = Header {
            signature,
            device_count,
            digest: Digest::from_bytes(digest),
            timestamp,
        };

        Ok((header, raw::HEADER_SIZE))
    }
}
