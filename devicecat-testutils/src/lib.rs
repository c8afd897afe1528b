//! Test helpers for `devicecat`.
#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Magic value written by [`CatalogBuilder`] unless overridden.
pub const SIGNATURE: u32 = 0xcafe_f00d;

const HEADER_SIZE: usize = 48;
const NAME_SIZE: usize = 256;

/// Returns the full path to the specified fixture.
///
/// Fixtures are stored in the `devicecat-testutils/fixtures` directory and paths should be given
/// relative to that location.
///
/// # Example
///
/// ```
/// use devicecat_testutils::fixture;
///
/// let path = fixture("catalog/three_devices.bin");
/// assert!(path.ends_with("catalog/three_devices.bin"));
/// ```
pub fn fixture<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut full_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    full_path.push("fixtures");

    let path = path.as_ref();
    full_path.push(path);

    assert!(
        full_path.exists(),
        "Fixture does not exist: {}",
        full_path.display()
    );

    full_path
}

/// A device to be written by [`CatalogBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestDevice {
    /// Name bytes, written without a terminator if they fill the whole field.
    pub name: Vec<u8>,
    /// Hardware address, only the low 48 bits are written.
    pub mac: u64,
    /// Firmware major version.
    pub major: u8,
    /// Firmware minor version.
    pub minor: u8,
}

/// Encodes synthetic device catalogs for tests.
///
/// The output follows the layout of catalogs written by the production generator: a 48 byte
/// header with the timestamp aligned to 8 bytes, followed by 264 byte device records.
///
/// ```
/// use devicecat_testutils::CatalogBuilder;
///
/// let buf = CatalogBuilder::new()
///     .device("Porch Light", 0xaabb_ccdd_eeff, 1, 2)
///     .build();
/// assert_eq!(buf.len(), 48 + 264);
/// ```
#[derive(Clone, Debug)]
pub struct CatalogBuilder {
    signature: u32,
    timestamp: u64,
    devices: Vec<TestDevice>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// Creates a builder without devices.
    pub fn new() -> Self {
        CatalogBuilder {
            signature: SIGNATURE,
            timestamp: 1_672_531_200,
            devices: Vec::new(),
        }
    }

    /// Overrides the header signature.
    pub fn signature(mut self, signature: u32) -> Self {
        self.signature = signature;
        self
    }

    /// Overrides the header timestamp.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Appends a device.
    pub fn device(self, name: &str, mac: u64, major: u8, minor: u8) -> Self {
        self.raw_device(TestDevice {
            name: name.as_bytes().to_vec(),
            mac,
            major,
            minor,
        })
    }

    /// Appends a device with an arbitrary name field.
    pub fn raw_device(mut self, device: TestDevice) -> Self {
        assert!(device.name.len() <= NAME_SIZE, "name too long");
        self.devices.push(device);
        self
    }

    /// Encodes only the device records.
    pub fn records(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for device in &self.devices {
            let mut name = [0u8; NAME_SIZE];
            name[..device.name.len()].copy_from_slice(&device.name);
            out.extend_from_slice(&name);

            let word = (device.mac & 0xffff_ffff_ffff)
                | (u64::from(device.major) << 48)
                | (u64::from(device.minor) << 56);
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Encodes the catalog with the correct digest of its records.
    pub fn build(&self) -> Vec<u8> {
        let records = self.records();
        let digest: [u8; 32] = Sha256::digest(&records).into();
        self.encode(&digest, &records)
    }

    /// Encodes the catalog with the given digest.
    pub fn build_with_digest(&self, digest: [u8; 32]) -> Vec<u8> {
        self.encode(&digest, &self.records())
    }

    fn encode(&self, digest: &[u8; 32], records: &[u8]) -> Vec<u8> {
        let count = u8::try_from(self.devices.len()).expect("at most 255 devices");

        let mut out = Vec::with_capacity(HEADER_SIZE + records.len());
        out.extend_from_slice(&self.signature.to_le_bytes());
        out.push(count);
        out.extend_from_slice(digest);
        out.extend_from_slice(&[0; 3]);
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(records);
        out
    }
}
