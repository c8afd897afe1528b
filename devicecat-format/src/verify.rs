//! Integrity verification of the device record region.

use std::fmt;

use sha2::{Digest as _, Sha256};

use crate::raw::DIGEST_SIZE;

/// A SHA-256 digest as stored in the catalog header.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }

    /// Computes the SHA-256 digest of `data`.
    pub fn compute(data: &[u8]) -> Self {
        Digest(Sha256::digest(data).into())
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Checks that the SHA-256 digest of `record_bytes` equals `expected`.
///
/// `record_bytes` must be exactly the record region of the catalog. All 32 bytes are compared
/// and any difference counts as a mismatch.
///
/// ```
/// use devicecat_format::{verify, Digest};
///
/// let digest = Digest::compute(b"");
/// assert!(verify(b"", &digest));
/// assert!(!verify(b"\0", &digest));
/// ```
#[tracing::instrument(level = "trace", name = "verify", skip_all, fields(len = record_bytes.len()))]
pub fn verify(record_bytes: &[u8], expected: &Digest) -> bool {
    let computed = Digest::compute(record_bytes);

    let diff = computed
        .0
        .iter()
        .zip(expected.0.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));

    if diff != 0 {
        tracing::debug!(%expected, %computed, "digest mismatch");
    }

    diff == 0
}
