//! Positional read capability.
//!
//! Archive members are addressed by absolute offsets, so everything that
//! touches archive bytes reads through [`ReadAt`] instead of a seek cursor.
//! [`ReadAtCursor`] bridges back to `Read + Seek` for consumers such as the
//! ELF decoder that expect a stream.

use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

/// A random-access byte source.
///
/// Implementations must not depend on any shared cursor: two calls with the
/// same offset return the same bytes.
pub trait ReadAt {
    /// Reads up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read. `Ok(0)` for a non-empty `buf`
    /// signals end of data.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Returns the total number of bytes available.
    fn size(&self) -> io::Result<u64>;

    /// Fills `buf` completely from `offset`.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::UnexpectedEof` if the source ends before `buf` is
    /// full.
    fn read_exact_at(&self, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            match self.read_at(buf, offset) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "failed to fill whole buffer",
                    ));
                }
                Ok(n) => {
                    buf = &mut buf[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }

    fn size(&self) -> io::Result<u64> {
        (**self).size()
    }
}

impl ReadAt for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= self.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.as_slice().read_at(buf, offset)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }
}

impl ReadAt for File {
    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

/// Adapts a [`ReadAt`] source into a `Read + Seek` stream.
///
/// The cursor keeps its own position; the underlying source is never moved.
///
/// # Examples
///
/// ```
/// use elfdiff_core::io::ReadAtCursor;
/// use std::io::Read;
/// use std::io::Seek;
/// use std::io::SeekFrom;
///
/// let data = b"hello world".to_vec();
/// let mut cursor = ReadAtCursor::new(&data);
/// cursor.seek(SeekFrom::Start(6))?;
///
/// let mut out = String::new();
/// cursor.read_to_string(&mut out)?;
/// assert_eq!(out, "world");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ReadAtCursor<R> {
    source: R,
    position: u64,
}

impl<R: ReadAt> ReadAtCursor<R> {
    /// Creates a cursor positioned at the start of `source`.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Consumes the cursor and returns the wrapped source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: ReadAt> Read for ReadAtCursor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read_at(buf, self.position)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: ReadAt> Seek for ReadAtCursor<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, delta) = match pos {
            SeekFrom::Start(offset) => {
                self.position = offset;
                return Ok(offset);
            }
            SeekFrom::End(delta) => (self.source.size()?, delta),
            SeekFrom::Current(delta) => (self.position, delta),
        };
        let target = base.checked_add_signed(delta).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.position = target;
        Ok(target)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_read_at() {
        let data: &[u8] = b"abcdef";
        let mut buf = [0u8; 4];
        assert_eq!(data.read_at(&mut buf, 4).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(data.read_at(&mut buf, 6).unwrap(), 0);
        assert_eq!(data.read_at(&mut buf, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn test_read_exact_at_short_source() {
        let data = b"abc".to_vec();
        let mut buf = [0u8; 4];
        let err = data.read_exact_at(&mut buf, 0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let mut buf = [0u8; 2];
        data.read_exact_at(&mut buf, 1).unwrap();
        assert_eq!(&buf, b"bc");
    }

    #[test]
    fn test_cursor_seek_variants() {
        let data = b"0123456789".to_vec();
        let mut cursor = ReadAtCursor::new(&data);

        assert_eq!(cursor.seek(SeekFrom::End(-3)).unwrap(), 7);
        let mut buf = [0u8; 3];
        cursor.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"789");

        assert_eq!(cursor.seek(SeekFrom::Current(-5)).unwrap(), 5);
        assert!(cursor.seek(SeekFrom::Current(-6)).is_err());
        assert_eq!(cursor.stream_position().unwrap(), 5);
    }

    #[test]
    fn test_file_read_at() {
        use std::io::Write;

        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"positional").unwrap();

        let mut buf = [0u8; 5];
        file.read_exact_at(&mut buf, 5).unwrap();
        assert_eq!(&buf, b"ional");
        assert_eq!(ReadAt::size(&file).unwrap(), 10);
    }
}
