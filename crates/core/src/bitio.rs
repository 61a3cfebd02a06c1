//! Bit-level I/O layered over byte streams.
//!
//! [`BitWriter`] and [`BitReader`] turn any `Write`/`Read` into a sequence of
//! individual bits. Each keeps a single in-progress byte; bits fill slots
//! 0, 1, 2, ... of that byte in call order, where slot `i` is the bit with
//! value `1 << i`. The reader consumes slots in the same order, so a reader
//! over the writer's output returns exactly the bits that were written.
//!
//! # Padding Rules
//! - BitWriter: unfilled slots of the final byte are zero
//! - BitReader: cannot tell padding from data (caller must know how many
//!   codes to decode)
//!
//! # Byte and integer fields
//! `write_byte`/`read_byte` and `write_int`/`read_int` go straight to the
//! underlying stream and never touch the bit buffer. Interleaving them with
//! bit operations is only meaningful at byte boundaries; the file format uses
//! them exclusively for the header, before any payload bit.
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! for bit in [1, 0, 1] {
//!     writer.write_bit(bit).unwrap();
//! }
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0b0000_0101]);
//!
//! let mut reader = BitReader::new(bytes.as_slice());
//! assert_eq!(reader.read_bit().unwrap(), Some(1));
//! assert_eq!(reader.read_bit().unwrap(), Some(0));
//! assert_eq!(reader.read_bit().unwrap(), Some(1));
//! ```

use std::io::{self, Read, Write};

use crate::error::{BitIoError, Result};

/// Writes individual bits to an owned byte stream.
///
/// Dropping a writer flushes any pending bits on a best-effort basis; call
/// [`BitWriter::finish`] to observe flush errors and recover the stream.
///
/// # Invariants
/// - `bit_count` is always < 8 between calls
/// - slots at or above `bit_count` in `bit_buffer` are zero
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying stream (None only after `finish`)
    inner: Option<W>,
    /// Accumulator for the current partial byte
    bit_buffer: u8,
    /// Number of slots filled in bit_buffer (0-7)
    bit_count: u8,
    /// Total bits passed to write_bit
    bits_written: u64,
    /// Total bytes handed to the underlying stream
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a writer over `inner` with an empty bit buffer.
    pub fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            bit_buffer: 0,
            bit_count: 0,
            bits_written: 0,
            bytes_written: 0,
        }
    }

    /// Append the least significant bit of `bit` to the bit buffer.
    ///
    /// Writes one byte to the stream when the buffer fills up.
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        self.bit_buffer |= (bit & 1) << self.bit_count;
        self.bit_count += 1;
        self.bits_written += 1;

        if self.bit_count == 8 {
            self.emit_buffer()?;
        }
        Ok(())
    }

    /// Write a whole byte, bypassing the bit buffer.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.stream()?.write_all(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Write a 32-bit integer in native byte order, bypassing the bit buffer.
    pub fn write_int(&mut self, value: u32) -> Result<()> {
        self.stream()?.write_all(&value.to_ne_bytes())?;
        self.bytes_written += 4;
        Ok(())
    }

    /// Write out any pending bits, then flush the underlying stream.
    ///
    /// Unfilled slots of the pending byte are written as zeros. Nothing is
    /// written when no bits are pending.
    pub fn flush(&mut self) -> Result<()> {
        if self.bit_count > 0 {
            self.emit_buffer()?;
        }
        self.stream()?.flush()?;
        Ok(())
    }

    /// Flush and return the underlying stream.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        self.inner.take().ok_or_else(|| writer_finished().into())
    }

    /// Number of bits currently waiting in the buffer.
    pub fn pending_bits(&self) -> u8 {
        self.bit_count
    }

    /// Total number of bits passed to `write_bit`.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Total number of bytes handed to the underlying stream.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Hand the pending byte to the stream.
    ///
    /// The buffer is cleared before the write, so a failed write loses that
    /// byte but leaves the writer usable.
    fn emit_buffer(&mut self) -> Result<()> {
        let byte = self.bit_buffer;
        self.bit_buffer = 0;
        self.bit_count = 0;
        self.stream()?.write_all(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }

    fn stream(&mut self) -> io::Result<&mut W> {
        self.inner.as_mut().ok_or_else(writer_finished)
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            // Errors cannot be reported from drop; `finish` surfaces them.
            let _ = self.flush();
        }
    }
}

fn writer_finished() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "bit writer already finished")
}

/// Reads individual bits from an owned byte stream.
///
/// # Invariants
/// - `bits_left` is the number of unread slots in `bit_buffer` (0-8)
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying stream
    inner: R,
    /// The byte currently being consumed
    bit_buffer: u8,
    /// Unread slots remaining in bit_buffer (0 = refill on next read)
    bits_left: u8,
    /// Total bits returned by read_bit
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a reader over `inner` with an exhausted bit buffer.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bit_buffer: 0,
            bits_left: 0,
            bits_read: 0,
        }
    }

    /// Read the next bit as `Some(0)` or `Some(1)`.
    ///
    /// Refills the buffer with one byte from the stream when it is
    /// exhausted. Returns `None` once the stream has no more bytes.
    pub fn read_bit(&mut self) -> Result<Option<u8>> {
        if self.bits_left == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.bit_buffer = byte;
                    self.bits_left = 8;
                }
                None => return Ok(None),
            }
        }

        let slot = 8 - self.bits_left;
        self.bits_left -= 1;
        self.bits_read += 1;
        Ok(Some((self.bit_buffer >> slot) & 1))
    }

    /// Read the next bit, treating end of data as an error.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` if the stream is exhausted.
    pub fn require_bit(&mut self) -> Result<u8> {
        self.read_bit()?
            .ok_or_else(|| BitIoError::UnexpectedEof.into())
    }

    /// Read a whole byte, bypassing the bit buffer.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.next_byte()?)
    }

    /// Read a 32-bit native-endian integer, bypassing the bit buffer.
    ///
    /// Returns `None` if the stream is already at its end.
    ///
    /// # Errors
    /// `BitIoError::TruncatedInt` if the stream ends inside the integer.
    pub fn read_int(&mut self) -> Result<Option<u32>> {
        let mut bytes = [0u8; 4];
        let mut got = 0;
        while got < bytes.len() {
            match self.next_byte()? {
                Some(byte) => {
                    bytes[got] = byte;
                    got += 1;
                }
                None => break,
            }
        }

        match got {
            0 => Ok(None),
            4 => Ok(Some(u32::from_ne_bytes(bytes))),
            _ => Err(BitIoError::TruncatedInt { got }.into()),
        }
    }

    /// Total number of bits returned by `read_bit`.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Return the underlying stream, discarding any unread buffered bits.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn write_bits(bits: &[u8]) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        for &bit in bits {
            writer.write_bit(bit).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_first_bit_lands_in_slot_zero() {
        assert_eq!(write_bits(&[1, 0, 0, 0, 0, 0, 0, 0]), vec![0x01]);
        assert_eq!(write_bits(&[0, 0, 0, 0, 0, 0, 0, 1]), vec![0x80]);
    }

    #[test]
    fn test_bit_by_bit() {
        let bits = [1, 0, 1, 1, 0, 0, 1, 0];
        let bytes = write_bits(&bits);
        assert_eq!(bytes, vec![0b0100_1101]);

        let mut reader = BitReader::new(bytes.as_slice());
        for &expected in &bits {
            assert_eq!(reader.read_bit().unwrap(), Some(expected));
        }
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_only_lsb_is_written() {
        assert_eq!(write_bits(&[0xFF, 0xFE, 0x03]), vec![0b0000_0101]);
    }

    #[test]
    fn test_padding() {
        let bytes = write_bits(&[1]);
        assert_eq!(bytes, vec![0b0000_0001]);
    }

    #[test]
    fn test_flush_without_pending_bits_writes_nothing() {
        let mut writer = BitWriter::new(Vec::new());
        writer.flush().unwrap();
        assert_eq!(writer.finish().unwrap(), Vec::<u8>::new());

        assert_eq!(write_bits(&[1, 1, 1, 1, 1, 1, 1, 1]), vec![0xFF]);
    }

    #[test]
    fn test_multi_byte() {
        let bits: Vec<u8> = (0..20).map(|i| (i % 3 == 0) as u8).collect();
        let bytes = write_bits(&bits);
        assert_eq!(bytes.len(), 3);

        let mut reader = BitReader::new(bytes.as_slice());
        let read: Vec<u8> = (0..20).map(|_| reader.read_bit().unwrap().unwrap()).collect();
        assert_eq!(read, bits);
        assert_eq!(reader.bits_read(), 20);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0b1010_1010u8];
        let mut reader = BitReader::new(&data[..]);
        for _ in 0..8 {
            assert!(reader.read_bit().unwrap().is_some());
        }
        assert_eq!(reader.read_bit().unwrap(), None);
        assert!(matches!(
            reader.require_bit(),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
    }

    #[test]
    fn test_bytes_and_ints_bypass_bit_buffer() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_int(0xDEAD_BEEF).unwrap();
        writer.write_byte(7).unwrap();
        writer.write_bit(1).unwrap();
        assert_eq!(writer.pending_bits(), 1);
        writer.write_byte(9).unwrap();
        assert_eq!(writer.pending_bits(), 1);
        let bytes = writer.finish().unwrap();

        let mut expected = 0xDEAD_BEEFu32.to_ne_bytes().to_vec();
        expected.extend_from_slice(&[7, 9, 1]);
        assert_eq!(bytes, expected);

        let mut reader = BitReader::new(bytes.as_slice());
        assert_eq!(reader.read_int().unwrap(), Some(0xDEAD_BEEF));
        assert_eq!(reader.read_byte().unwrap(), Some(7));
        assert_eq!(reader.read_byte().unwrap(), Some(9));
        assert_eq!(reader.read_bit().unwrap(), Some(1));
    }

    #[test]
    fn test_read_int_at_end_and_truncated() {
        let mut reader = BitReader::new(&[0u8; 0][..]);
        assert_eq!(reader.read_int().unwrap(), None);

        let mut reader = BitReader::new(&[1u8, 2][..]);
        assert!(matches!(
            reader.read_int(),
            Err(Error::BitIo(BitIoError::TruncatedInt { got: 2 }))
        ));
    }

    #[test]
    fn test_drop_flushes_pending_bits() {
        let mut sink = Vec::new();
        {
            let mut writer = BitWriter::new(&mut sink);
            writer.write_bit(0).unwrap();
            writer.write_bit(1).unwrap();
        }
        assert_eq!(sink, vec![0b0000_0010]);
    }

    /// Rejects its first write, then behaves like a `Vec<u8>`.
    struct FailFirstWrite {
        failed: bool,
        data: Vec<u8>,
    }

    impl Write for FailFirstWrite {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_emit_keeps_writer_usable() {
        let mut writer = BitWriter::new(FailFirstWrite {
            failed: false,
            data: Vec::new(),
        });
        for _ in 0..7 {
            writer.write_bit(1).unwrap();
        }
        assert!(matches!(writer.write_bit(1), Err(Error::Io(_))));
        assert_eq!(writer.pending_bits(), 0);
        assert_eq!(writer.bytes_written(), 0);

        for bit in [1, 0, 1] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.pending_bits(), 3);
        let sink = writer.finish().unwrap();
        assert_eq!(sink.data, vec![0b0000_0101]);
    }

    #[test]
    fn test_counters() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_int(3).unwrap();
        for _ in 0..9 {
            writer.write_bit(1).unwrap();
        }
        assert_eq!(writer.bits_written(), 9);
        assert_eq!(writer.bytes_written(), 5);
        writer.flush().unwrap();
        assert_eq!(writer.bytes_written(), 6);
    }
}
