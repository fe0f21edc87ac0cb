//! Buffered copy that reports which side failed.

use std::io;
use std::io::Read;
use std::io::Write;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for copying.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Side of a copy that failed.
#[derive(Debug)]
pub enum CopyError {
    /// Reading from the source failed.
    Read(io::Error),
    /// Writing to the sink failed.
    Write(io::Error),
}

/// Copies everything from `reader` to `writer`, returning the byte count.
///
/// Interrupted reads are retried. The writer is not flushed.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use zipstage_core::copy::CopyBuffer;
/// use zipstage_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut input = Cursor::new(b"hello".to_vec());
/// let mut output = Vec::new();
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
/// assert_eq!(copied, 5);
/// ```
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, CopyError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;

        total += bytes_read as u64;
    }

    Ok(total)
}
