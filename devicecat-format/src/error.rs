use std::error::Error;
use std::fmt;

use thiserror::Error;

/// The kind of a [`CatalogError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// The buffer is shorter than the fixed header.
    TruncatedHeader,

    /// The buffer is shorter than the header plus the declared device records.
    TruncatedRecords,

    /// The digest of the device records does not match the digest stored in the header.
    IntegrityMismatch,

    /// The catalog could not be acquired from storage.
    ResourceUnavailable,

    /// The header does not start with the catalog signature.
    ///
    /// Only raised when signature checking is enabled in [`DecodeOptions`](crate::DecodeOptions).
    BadSignature,
}

impl fmt::Display for CatalogErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader => write!(f, "catalog is too small to hold a header"),
            Self::TruncatedRecords => write!(f, "catalog is too small to hold all device records"),
            Self::IntegrityMismatch => write!(f, "device record digest does not match"),
            Self::ResourceUnavailable => write!(f, "cannot read device catalog"),
            Self::BadSignature => write!(f, "bad catalog signature"),
        }
    }
}

/// An error returned when decoding or verifying a device catalog.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct CatalogError {
    kind: CatalogErrorKind,
    #[source]
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl CatalogError {
    /// Creates a new catalog error from a known kind of error as well as an arbitrary error
    /// payload.
    pub fn new<E>(kind: CatalogErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let source = Some(source.into());
        Self { kind, source }
    }

    /// Returns the corresponding [`CatalogErrorKind`] for this error.
    pub fn kind(&self) -> CatalogErrorKind {
        self.kind
    }
}

impl From<CatalogErrorKind> for CatalogError {
    fn from(kind: CatalogErrorKind) -> Self {
        Self { kind, source: None }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(source: std::io::Error) -> Self {
        Self::new(CatalogErrorKind::ResourceUnavailable, source)
    }
}
