use std::fmt;

use scroll::Pread;

use crate::device::DeviceRecord;
use crate::error::{CatalogError, CatalogErrorKind};
use crate::header::Header;
use crate::raw;
use crate::verify::verify;

/// Options controlling how strictly a catalog is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject catalogs whose header does not carry the catalog signature.
    ///
    /// When disabled, an unexpected signature is only logged.
    pub check_signature: bool,
}

impl DecodeOptions {
    /// Creates options that accept any signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the signature is checked.
    pub fn check_signature(mut self, check: bool) -> Self {
        self.check_signature = check;
        self
    }
}

/// The result of decoding a catalog buffer, before its integrity was verified.
#[derive(Clone, Debug)]
pub struct Decoded<'data> {
    /// A copy of the catalog header.
    pub header: Header,
    /// Exactly the bytes of the declared device records.
    pub record_region: &'data [u8],
    /// The decoded device records, in file order.
    pub devices: Vec<DeviceRecord>,
    trailing_len: usize,
}

impl Decoded<'_> {
    /// Number of bytes after the record region that are not covered by the digest.
    pub fn trailing_len(&self) -> usize {
        self.trailing_len
    }

    /// Checks the record region against the digest stored in the header.
    pub fn verify(&self) -> bool {
        verify(self.record_region, &self.header.digest)
    }
}

/// Decodes a catalog buffer with default [`DecodeOptions`].
///
/// See [`decode_with_options`].
pub fn decode(buf: &[u8]) -> Result<Decoded<'_>, CatalogError> {
    decode_with_options(buf, DecodeOptions::default())
}

/// Decodes the header and all device records of a catalog buffer.
///
/// The header is validated against the buffer length before any record is touched. Bytes past the
/// declared records are ignored. No records are returned if any check fails.
#[tracing::instrument(level = "trace", name = "decode", skip_all, fields(len = buf.len()))]
pub fn decode_with_options(
    buf: &[u8],
    options: DecodeOptions,
) -> Result<Decoded<'_>, CatalogError> {
    if buf.len() < raw::HEADER_SIZE {
        return Err(CatalogErrorKind::TruncatedHeader.into());
    }

    let header = buf
        .pread_with::<Header>(0, raw::CATALOG_ENDIAN)
        .map_err(|e| CatalogError::new(CatalogErrorKind::TruncatedHeader, e))?;

    if !header.has_valid_signature() {
        if options.check_signature {
            return Err(CatalogErrorKind::BadSignature.into());
        }
        tracing::warn!(
            signature = format_args!("{:#010x}", header.signature),
            "unexpected catalog signature"
        );
    }

    let region_len = header.record_region_len();
    let record_region = buf
        .get(raw::HEADER_SIZE..raw::HEADER_SIZE + region_len)
        .ok_or(CatalogErrorKind::TruncatedRecords)?;

    let trailing_len = buf.len() - raw::HEADER_SIZE - region_len;
    if trailing_len > 0 {
        tracing::debug!(trailing_len, "ignoring bytes after the device records");
    }

    let devices = record_region
        .chunks_exact(raw::RECORD_SIZE)
        .map(|chunk| chunk.pread_with::<DeviceRecord>(0, raw::CATALOG_ENDIAN))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CatalogError::new(CatalogErrorKind::TruncatedRecords, e))?;

    Ok(Decoded {
        header,
        record_region,
        devices,
        trailing_len,
    })
}

/// A decoded and verified device catalog.
///
/// The catalog owns copies of its header and records and does not borrow the input buffer.
///
/// ```
/// use devicecat_format::{CatalogErrorKind, DeviceCatalog};
///
/// let err = DeviceCatalog::parse(b"too short").unwrap_err();
/// assert_eq!(err.kind(), CatalogErrorKind::TruncatedHeader);
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceCatalog {
    header: Header,
    devices: Vec<DeviceRecord>,
}

impl DeviceCatalog {
    /// Decodes and verifies a catalog with default [`DecodeOptions`].
    pub fn parse(buf: &[u8]) -> Result<Self, CatalogError> {
        Self::parse_with_options(buf, DecodeOptions::default())
    }

    /// Decodes a catalog and verifies the digest of its device records.
    ///
    /// Returns [`CatalogErrorKind::IntegrityMismatch`] if the records do not match the digest in
    /// the header.
    #[tracing::instrument(level = "trace", name = "DeviceCatalog::parse", skip_all)]
    pub fn parse_with_options(buf: &[u8], options: DecodeOptions) -> Result<Self, CatalogError> {
        let decoded = decode_with_options(buf, options)?;

        if !decoded.verify() {
            return Err(CatalogErrorKind::IntegrityMismatch.into());
        }

        Ok(DeviceCatalog {
            header: decoded.header,
            devices: decoded.devices,
        })
    }

    /// The catalog header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// All devices in file order.
    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    /// Number of devices in the catalog.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if the catalog lists no devices.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl fmt::Debug for DeviceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCatalog")
            .field("signature", &format_args!("{:#010x}", self.header.signature))
            .field("timestamp", &self.header.timestamp)
            .field("digest", &self.header.digest)
            .field("devices", &self.devices)
            .finish()
    }
}

impl<'a> IntoIterator for &'a DeviceCatalog {
    type Item = &'a DeviceRecord;
    type IntoIter = std::slice::Iter<'a, DeviceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}
