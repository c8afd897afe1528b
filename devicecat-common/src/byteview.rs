//! Owned access to the raw bytes of a device catalog.
//!
//! See the [`ByteView`] struct for more documentation.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

/// The owner of data behind a ByteView.
#[derive(Debug)]
enum Backing<'a> {
    Buf(Cow<'a, [u8]>),
    Mmap(Mmap),
}

impl Deref for Backing<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        match *self {
            Backing::Buf(ref buf) => buf,
            Backing::Mmap(ref mmap) => mmap,
        }
    }
}

/// A read-only view of catalog bytes.
///
/// This is the single owner of an input buffer. It is created once, either from memory or by
/// mapping a file, and dereferences into a `&[u8]` that the decoder borrows. Dropping the view
/// releases the buffer or the mapping on every exit path.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use devicecat_common::ByteView;
///
/// fn main() -> Result<(), std::io::Error> {
///     let mut file = tempfile::tempfile()?;
///     file.write_all(b"\x0d\xf0\xfe\xca")?;
///
///     let view = ByteView::map_file(file)?;
///     assert_eq!(view.as_slice(), b"\x0d\xf0\xfe\xca");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ByteView<'a> {
    backing: Backing<'a>,
}

impl<'a> ByteView<'a> {
    /// Constructs a `ByteView` borrowing a byte slice.
    ///
    /// ```
    /// use devicecat_common::ByteView;
    ///
    /// let view = ByteView::from_slice(b"1234");
    /// assert_eq!(view.len(), 4);
    /// ```
    pub fn from_slice(buffer: &'a [u8]) -> Self {
        ByteView {
            backing: Backing::Buf(Cow::Borrowed(buffer)),
        }
    }

    /// Constructs a `ByteView` taking ownership of a vector of bytes.
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        ByteView {
            backing: Backing::Buf(Cow::Owned(buffer)),
        }
    }

    /// Constructs a `ByteView` by reading a reader to its end.
    ///
    /// Prefer [`ByteView::open`] for files on disk.
    pub fn read<R: io::Read>(mut reader: R) -> Result<Self, io::Error> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(ByteView::from_vec(buffer))
    }

    /// Constructs a `ByteView` by memory mapping an open file.
    pub fn map_file(file: File) -> Result<Self, io::Error> {
        // SAFETY: the mapping is read-only and the catalog is read exactly once. Concurrent
        // truncation by another process is outside of what this crate protects against.
        let backing = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => Backing::Mmap(mmap),
            Err(err) => {
                // raised when mapping empty files, which are read as an empty buffer. The 1006
                // Windows error is reported for files altered externally after opening.
                if err.kind() == io::ErrorKind::InvalidInput
                    || (cfg!(windows) && err.raw_os_error() == Some(1006))
                {
                    Backing::Buf(Cow::Borrowed(b""))
                } else {
                    return Err(err);
                }
            }
        };

        Ok(ByteView { backing })
    }

    /// Constructs a `ByteView` from a file path by memory mapping the file.
    ///
    /// ```no_run
    /// use devicecat_common::ByteView;
    ///
    /// fn main() -> Result<(), std::io::Error> {
    ///     let view = ByteView::open("devices.bin")?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Self::map_file(file)
    }

    /// Returns a slice of the underlying data.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.backing
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Deref for ByteView<'_> {
    type Target = [u8];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
