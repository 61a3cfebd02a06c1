//! End-to-end tests of the huffpack binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn huffpack(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_huffpack"))
        .args(args)
        .output()
        .expect("failed to run huffpack")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

#[test]
fn test_compress_decompress_round_trip() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("raw.txt");
    let packed = dir.path().join("raw.huff");
    let restored = dir.path().join("restored.txt");

    let data = b"a man a plan a canal panama\n".repeat(100);
    std::fs::write(&raw, &data).unwrap();

    let out = huffpack(&["compress", path_str(&raw), path_str(&packed)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(std::fs::metadata(&packed).unwrap().len() < data.len() as u64);

    let out = huffpack(&["decompress", path_str(&packed), path_str(&restored), "--stats"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Decompression Summary"));

    assert_eq!(std::fs::read(&restored).unwrap(), data);
}

#[test]
fn test_empty_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("empty");
    let packed = dir.path().join("empty.huff");
    let restored = dir.path().join("empty.out");
    std::fs::write(&raw, b"").unwrap();

    assert!(huffpack(&["compress", path_str(&raw), path_str(&packed)]).status.success());
    assert_eq!(std::fs::metadata(&packed).unwrap().len(), 8);
    assert!(huffpack(&["decompress", path_str(&packed), path_str(&restored)]).status.success());
    assert_eq!(std::fs::read(&restored).unwrap(), b"");
}

#[test]
fn test_sample_then_round_trip() {
    let dir = TempDir::new().unwrap();
    let sample = dir.path().join("sample.bin");
    let packed = dir.path().join("sample.huff");
    let restored = dir.path().join("sample.out");

    let out = huffpack(&["sample", path_str(&sample), "--seed", "7", "--size", "30000"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("seed: 7"));
    assert_eq!(std::fs::metadata(&sample).unwrap().len(), 30_000);

    let out = huffpack(&["compress", path_str(&sample), path_str(&packed), "--stats"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Compression Summary"));

    assert!(huffpack(&["decompress", path_str(&packed), path_str(&restored)]).status.success());
    assert_eq!(std::fs::read(&restored).unwrap(), std::fs::read(&sample).unwrap());
}

#[test]
fn test_missing_input_reports_error_without_output() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    let packed = dir.path().join("nope.huff");

    let out = huffpack(&["compress", path_str(&missing), path_str(&packed)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nope.txt"));
    assert!(!packed.exists());
}

#[test]
fn test_usage_error() {
    let out = huffpack(&["compress", "just-one-path"]);
    assert!(!out.status.success());
}

#[test]
fn test_corrupt_header_is_reported() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.huff");
    let restored = dir.path().join("bogus.out");

    let mut bytes = 3u32.to_ne_bytes().to_vec();
    bytes.extend_from_slice(&2u32.to_ne_bytes());
    bytes.extend_from_slice(&[b'a', 1, b'a', 1, 0]);
    std::fs::write(&bogus, &bytes).unwrap();

    let out = huffpack(&["decompress", path_str(&bogus), path_str(&restored)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("more than once"));
}
