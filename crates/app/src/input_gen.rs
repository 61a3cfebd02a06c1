//! Sample input generation.
//!
//! `huffpack sample` writes seeded data with a chosen byte distribution, so
//! the effect of symbol skew on code lengths and ratio is easy to see.
//!
//! # Profiles
//!
//! - `mixed`: 8 KiB sections drawn from the other profiles plus single-byte
//!   runs
//! - `text`: lowercase letters and punctuation weighted like English prose
//! - `skewed`: symbol `k` roughly twice as likely as symbol `k + 1`
//! - `random`: uniform bytes (expect a ratio slightly above 100%)

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letters by approximate English frequency, most common first, with space.
const TEXT_ALPHABET: &[u8] = b" etaoinshrdlcumwfgypbvkjxqz.,\n";

/// Byte distribution of generated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    Mixed,
    Text,
    Skewed,
    Random,
}

/// Generate `size_bytes` of data following `profile`.
///
/// The same seed and profile always produce the same bytes.
pub fn generate_sample_data(profile: Profile, seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    match profile {
        Profile::Mixed => {
            while data.len() < size_bytes {
                let section = (size_bytes - data.len()).min(8192);
                match rng.gen_range(0..4) {
                    0 => {
                        let byte: u8 = rng.gen();
                        data.extend(std::iter::repeat(byte).take(section));
                    }
                    1 => push_text(&mut rng, &mut data, section),
                    2 => push_skewed(&mut rng, &mut data, section),
                    _ => push_random(&mut rng, &mut data, section),
                }
            }
        }
        Profile::Text => push_text(&mut rng, &mut data, size_bytes),
        Profile::Skewed => push_skewed(&mut rng, &mut data, size_bytes),
        Profile::Random => push_random(&mut rng, &mut data, size_bytes),
    }

    data
}

/// Rank-weighted pick from the text alphabet: rank `r` has weight `1/(r+2)`.
fn push_text(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, count: usize) {
    let weights: Vec<f64> = (0..TEXT_ALPHABET.len()).map(|r| 1.0 / (r as f64 + 2.0)).collect();
    let total: f64 = weights.iter().sum();
    for _ in 0..count {
        let mut pick = rng.gen::<f64>() * total;
        let mut idx = 0;
        while idx + 1 < weights.len() && pick >= weights[idx] {
            pick -= weights[idx];
            idx += 1;
        }
        data.push(TEXT_ALPHABET[idx]);
    }
}

/// Geometric symbol choice: keep flipping a fair coin, count the heads.
fn push_skewed(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, count: usize) {
    for _ in 0..count {
        let mut symbol = 0u8;
        while symbol < u8::MAX && rng.gen_bool(0.5) {
            symbol += 1;
        }
        data.push(symbol);
    }
}

fn push_random(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, count: usize) {
    data.extend((0..count).map(|_| rng.gen::<u8>()));
}

/// Write generated data to a file.
pub fn write_sample_file(path: &Path, profile: Profile, seed: u64, size_bytes: usize) -> std::io::Result<()> {
    let data = generate_sample_data(profile, seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}
