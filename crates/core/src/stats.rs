//! Run statistics for compress and decompress passes.
//!
//! Each pipeline call returns one of these structs. The binary prints them
//! with `print_summary`; `export_text` gives a stable `key=value` form for
//! scripts and tests.

use std::time::Duration;

/// What a compress run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressStats {
    /// Bytes read from the input (= symbols encoded)
    pub input_bytes: u64,
    /// Bytes written, header included
    pub output_bytes: u64,
    /// Bytes taken by the count fields and the (symbol, depth) pairs
    pub header_bytes: u64,
    /// Bits of Huffman codes in the payload (before padding)
    pub payload_bits: u64,
    /// Distinct symbols in the input
    pub distinct_symbols: usize,
    /// Longest code length
    pub max_code_len: usize,
    /// Wall time of the run
    pub duration: Duration,
}

impl CompressStats {
    /// Compressed size over raw size. Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length in bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", self.duration.as_millis());
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes ({} header)", self.output_bytes, self.header_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Longest code: {} bits", self.max_code_len);
        println!("Average code: {:.3} bits/symbol", self.bits_per_symbol());
        println!();
    }

    /// Export as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             header_bytes={}\n\
             payload_bits={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             compression_ratio={:.4}\n",
            self.duration.as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.header_bytes,
            self.payload_bits,
            self.distinct_symbols,
            self.max_code_len,
            self.compression_ratio(),
        )
    }
}

/// What a decompress run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecompressStats {
    /// Symbol count declared in the header
    pub declared_symbols: u64,
    /// Bytes written to the output
    pub output_bytes: u64,
    /// Distinct symbols declared in the header
    pub distinct_symbols: usize,
    /// Payload bits consumed while decoding
    pub payload_bits: u64,
    /// Wall time of the run
    pub duration: Duration,
}

impl DecompressStats {
    /// Whether the bytes written match the symbol count in the header.
    pub fn verified(&self) -> bool {
        self.output_bytes == self.declared_symbols
    }

    /// Human-readable summary, as printed by `print_summary`.
    pub fn summary(&self) -> String {
        let verification = if self.verified() {
            "PASSED ✓"
        } else {
            "FAILED ✗ (size mismatch)"
        };
        format!(
            "\n=== Decompression Summary ===\n\
             Duration: {} ms\n\
             Symbols declared: {}\n\
             Output: {} bytes\n\
             Distinct symbols: {}\n\
             Payload bits read: {}\n\
             Verification: {}\n",
            self.duration.as_millis(),
            self.declared_symbols,
            self.output_bytes,
            self.distinct_symbols,
            self.payload_bits,
            verification,
        )
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("{}", self.summary());
    }

    /// Export as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             declared_symbols={}\n\
             output_bytes={}\n\
             distinct_symbols={}\n\
             payload_bits={}\n",
            self.duration.as_millis(),
            self.declared_symbols,
            self.output_bytes,
            self.distinct_symbols,
            self.payload_bits,
        )
    }
}
