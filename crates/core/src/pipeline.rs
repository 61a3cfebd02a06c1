//! Compress and decompress pipelines over the huffpack file format.
//!
//! # File Format
//!
//! ```text
//! +------------------------+
//! | symbol count (4)       |  u32, native byte order
//! +------------------------+
//! | distinct count D (4)   |  u32, native byte order
//! +------------------------+
//! | D x (symbol, depth)    |  2 bytes each, preorder
//! +------------------------+
//! | payload                |  codes packed slot-0-first,
//! | (variable)             |  last byte zero-padded
//! +------------------------+
//! ```
//!
//! The count fields use the host's byte order, so files move only between
//! hosts of the same endianness. There is no magic number or checksum.
//!
//! An empty input produces exactly the two count fields, both zero.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::bitio::{BitReader, BitWriter};
use crate::builder::build;
use crate::coder::{decode, encode};
use crate::error::{HeaderError, Result};
use crate::frequency::FrequencyTable;
use crate::header::{read_pairs, rebuild, store};
use crate::stats::{CompressStats, DecompressStats};
use crate::tree::ALPHABET_SIZE;

/// Read buffer size for the encoding pass and write batch size for decoding.
const CHUNK_BYTES: usize = 64 * 1024;

/// Compress everything from the current position of `input` into `output`.
///
/// The input is read twice: once to count symbol frequencies, then again
/// (after seeking back) to encode it.
///
/// # Errors
/// - `HeaderError::InputTooLarge` if the input exceeds `u32::MAX` bytes
/// - `Error::Io` if either stream fails, or if the input changes between
///   the two passes
pub fn compress<R, W>(input: &mut R, output: W) -> Result<CompressStats>
where
    R: Read + Seek,
    W: Write,
{
    let started = Instant::now();
    let start_pos = input.stream_position()?;

    let freqs = FrequencyTable::from_reader(&mut *input)?;
    let total = freqs.total();
    let symbol_count = u32::try_from(total).map_err(|_| HeaderError::InputTooLarge(total))?;

    let tree = build(&freqs);
    debug!(symbols = total, distinct = freqs.distinct(), "counted input");

    let mut writer = BitWriter::new(output);
    writer.write_int(symbol_count)?;
    writer.write_int(freqs.distinct() as u32)?;
    store(&tree, &mut writer)?;
    let header_bytes = writer.bytes_written();

    input.seek(SeekFrom::Start(start_pos))?;
    let mut buf = vec![0u8; CHUNK_BYTES];
    let mut encoded = 0u64;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        encoded += n as u64;
        if encoded > total {
            break;
        }
        for &symbol in &buf[..n] {
            encode(&tree, symbol, &mut writer)?;
        }
    }
    if encoded != total {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("input changed between passes: counted {total} bytes, re-read {encoded}"),
        )
        .into());
    }

    let payload_bits = writer.bits_written();
    writer.flush()?;
    let output_bytes = writer.bytes_written();
    writer.finish()?;

    let stats = CompressStats {
        input_bytes: total,
        output_bytes,
        header_bytes,
        payload_bits,
        distinct_symbols: freqs.distinct(),
        max_code_len: tree.max_depth(),
        duration: started.elapsed(),
    };
    info!(
        input_bytes = stats.input_bytes,
        output_bytes = stats.output_bytes,
        distinct = stats.distinct_symbols,
        "compressed"
    );
    Ok(stats)
}

/// Decompress a huffpack stream from `input` into `output`.
///
/// # Errors
/// - `HeaderError::Truncated` if the header ends early
/// - `HeaderError::InvalidDistinctCount` for a zero or >256 distinct count
///   with a nonzero symbol count
/// - any `rebuild` error for a malformed (symbol, depth) list
/// - `BitIoError::UnexpectedEof` if the payload ends before every declared
///   symbol is decoded
pub fn decompress<R, W>(input: R, mut output: W) -> Result<DecompressStats>
where
    R: Read,
    W: Write,
{
    let started = Instant::now();
    let mut reader = BitReader::new(input);

    let total = reader
        .read_int()?
        .ok_or(HeaderError::Truncated("symbol count"))?;
    let distinct = reader.read_int()?;

    if total == 0 {
        output.flush()?;
        debug!("empty stream");
        return Ok(DecompressStats {
            duration: started.elapsed(),
            ..Default::default()
        });
    }

    let distinct = distinct.ok_or(HeaderError::Truncated("distinct symbol count"))?;
    if distinct == 0 || distinct as usize > ALPHABET_SIZE {
        return Err(HeaderError::InvalidDistinctCount { distinct, total }.into());
    }

    let pairs = read_pairs(&mut reader, distinct as usize)?;
    let tree = rebuild(&pairs)?;

    let mut batch = Vec::with_capacity(CHUNK_BYTES.min(total as usize));
    let mut output_bytes = 0u64;
    for _ in 0..total {
        batch.push(decode(&tree, &mut reader)?);
        if batch.len() == CHUNK_BYTES {
            output.write_all(&batch)?;
            output_bytes += batch.len() as u64;
            batch.clear();
        }
    }
    output.write_all(&batch)?;
    output_bytes += batch.len() as u64;
    output.flush()?;

    let stats = DecompressStats {
        declared_symbols: u64::from(total),
        output_bytes,
        distinct_symbols: distinct as usize,
        payload_bits: reader.bits_read(),
        duration: started.elapsed(),
    };
    info!(
        output_bytes = stats.output_bytes,
        distinct = stats.distinct_symbols,
        "decompressed"
    );
    Ok(stats)
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(&mut io::Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(data, &mut out)?;
    Ok(out)
}

/// Compress the file at `input` into a new file at `output`.
///
/// The input is opened first; if that fails no output file is created.
pub fn compress_file(input: &Path, output: &Path) -> Result<CompressStats> {
    let mut reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    compress(&mut reader, writer)
}

/// Decompress the file at `input` into a new file at `output`.
///
/// The input is opened first; if that fails no output file is created.
pub fn decompress_file(input: &Path, output: &Path) -> Result<DecompressStats> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    decompress(reader, writer)
}
