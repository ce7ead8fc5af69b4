//! Bounded view over a sub-range of a random-access source.

use std::io;

use super::ReadAt;

/// A read-only window `[start, start + len)` over a parent [`ReadAt`] source.
///
/// The window owns no bytes. Every read is translated to
/// `parent.read_at(start + offset, ...)` and clamped to `len`, so bytes that
/// follow the window in the parent (for example the next archive member) are
/// never returned.
///
/// # Examples
///
/// ```
/// use elfdiff_core::io::ByteWindow;
/// use elfdiff_core::io::ReadAt;
///
/// let archive = b"headerHELLOnext".to_vec();
/// let member = ByteWindow::new(&archive, 6, 5);
///
/// let mut buf = [0u8; 16];
/// let n = member.read_at(&mut buf, 0)?;
/// assert_eq!(&buf[..n], b"HELLO");
/// assert_eq!(member.read_at(&mut buf, 5)?, 0);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ByteWindow<R> {
    parent: R,
    start: u64,
    len: u64,
}

impl<R> ByteWindow<R> {
    /// Creates a window of `len` bytes starting at `start` in `parent`.
    ///
    /// The range is not validated against the parent's size; reads past the
    /// parent's end simply come back short.
    #[must_use]
    pub fn new(parent: R, start: u64, len: u64) -> Self {
        Self { parent, start, len }
    }

    /// Offset of the window within the parent.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Declared length of the window.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the window covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes the window and returns the parent source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.parent
    }
}

impl<R: ReadAt> ByteWindow<R> {
    /// Creates a window covering all of `parent`.
    pub fn whole(parent: R) -> io::Result<Self> {
        let len = parent.size()?;
        Ok(Self::new(parent, 0, len))
    }
}

impl<R: ReadAt> ReadAt for ByteWindow<R> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        if offset >= self.len {
            return Ok(0);
        }
        let remaining = self.len - offset;
        let n = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let absolute = self.start.checked_add(offset).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "window offset overflows u64")
        })?;
        self.parent.read_at(&mut buf[..n], absolute)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.len)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::io::ReadAtCursor;
    use std::io::Read;

    fn parent() -> Vec<u8> {
        (0u8..=99).collect()
    }

    #[test]
    fn test_window_reads_translate_offsets() {
        let data = parent();
        let window = ByteWindow::new(&data, 10, 20);

        let mut buf = [0u8; 5];
        window.read_exact_at(&mut buf, 3).unwrap();
        assert_eq!(buf, [13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_window_clamps_at_end() {
        let data = parent();
        let window = ByteWindow::new(&data, 10, 20);

        let mut buf = [0u8; 8];
        assert_eq!(window.read_at(&mut buf, 16).unwrap(), 4);
        assert_eq!(&buf[..4], &[26, 27, 28, 29]);
        assert_eq!(window.read_at(&mut buf, 20).unwrap(), 0);
        assert_eq!(window.read_at(&mut buf, 1000).unwrap(), 0);
    }

    #[test]
    fn test_window_read_exact_past_end_fails() {
        let data = parent();
        let window = ByteWindow::new(&data, 90, 5);
        let mut buf = [0u8; 6];
        assert!(window.read_exact_at(&mut buf, 0).is_err());
    }

    #[test]
    fn test_window_beyond_parent_is_short() {
        let data = parent();
        let window = ByteWindow::new(&data, 95, 50);
        let mut buf = [0u8; 50];
        assert_eq!(window.read_at(&mut buf, 0).unwrap(), 5);
    }

    #[test]
    fn test_window_through_cursor() {
        let data = parent();
        let window = ByteWindow::new(&data, 40, 10);
        let mut out = Vec::new();
        ReadAtCursor::new(&window).read_to_end(&mut out).unwrap();
        assert_eq!(out, (40u8..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_nested_windows() {
        let data = parent();
        let outer = ByteWindow::new(&data, 10, 50);
        let inner = ByteWindow::new(&outer, 45, 10);
        assert_eq!(inner.size().unwrap(), 10);

        let mut buf = [0u8; 10];
        assert_eq!(inner.read_at(&mut buf, 0).unwrap(), 5);
        assert_eq!(&buf[..5], &[55, 56, 57, 58, 59]);
    }

    #[test]
    fn test_whole_window() {
        let data = parent();
        let window = ByteWindow::whole(&data).unwrap();
        assert_eq!(window.start(), 0);
        assert_eq!(window.len(), 100);
        assert!(!window.is_empty());
    }
}
