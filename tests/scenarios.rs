use std::fs;
use std::path::PathBuf;

use huffpack::container::{FIXED_HEADER_SIZE, MAGIC};
use huffpack::{
    compress, compress_file, decompress, decompress_file, Container, Error, FrequencyTable,
    HuffmanEncoder,
};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("huffpack-{}-{name}", std::process::id()))
}

#[test]
fn test_empty_input() {
    let compressed = compress(b"");
    let container = Container::decode(&compressed).unwrap();
    assert!(container.frequencies.is_empty());
    assert!(container.payload.is_empty());
    assert_eq!(container.padding, 0);
    assert_eq!(compressed.len(), FIXED_HEADER_SIZE + 1);
    assert_eq!(decompress(&compressed).unwrap(), b"");
}

#[test]
fn test_single_repeated_byte() {
    let encoder = HuffmanEncoder::new(&FrequencyTable::from_bytes(b"AAAA"));
    let code = encoder.codes().get(b'A').unwrap();
    assert!(!code.is_empty());

    let compressed = compress(b"AAAA");
    let container = Container::decode(&compressed).unwrap();
    assert_eq!(container.payload.len(), 1);
    assert_eq!(container.padding, 4);
    assert_eq!(decompress(&compressed).unwrap(), b"AAAA");
}

#[test]
fn test_abracadabra() {
    let compressed = compress(b"abracadabra");
    assert_eq!(decompress(&compressed).unwrap(), b"abracadabra");

    let encoder = HuffmanEncoder::new(&FrequencyTable::from_bytes(b"abracadabra"));
    let codes = encoder.codes();
    let a_len = codes.get(b'a').unwrap().len();
    assert!(codes
        .iter()
        .filter(|(symbol, _)| *symbol != b'a')
        .all(|(_, code)| code.len() > a_len));
}

#[test]
fn test_header_claims_more_symbols_than_listed() {
    // "aab" lists two symbols; claim three.
    let mut compressed = compress(b"aab");
    compressed[5..7].copy_from_slice(&3u16.to_le_bytes());
    assert!(matches!(decompress(&compressed), Err(Error::CorruptHeader(_))));
}

#[test]
fn test_header_claims_fewer_symbols_than_listed() {
    let mut compressed = compress(b"abracadabra");
    compressed[5..7].copy_from_slice(&4u16.to_le_bytes());
    assert!(matches!(decompress(&compressed), Err(Error::CorruptHeader(_))));
}

#[test]
fn test_truncated_payload() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let mut compressed = compress(data);
    compressed.truncate(compressed.len() - 2);
    let err = decompress(&compressed).unwrap_err();
    assert!(
        matches!(err, Error::TruncatedPayload { .. } | Error::InvalidTraversal(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn test_extra_payload_is_rejected() {
    let mut compressed = compress(b"abracadabra");
    compressed.push(0xFF);
    assert!(matches!(decompress(&compressed), Err(Error::CorruptHeader(_))));
}

#[test]
fn test_padding_out_of_range() {
    let mut compressed = compress(b"aab");
    let padding_at = compressed.len() - 2;
    compressed[padding_at] = 9;
    assert!(matches!(decompress(&compressed), Err(Error::InvalidTraversal(_))));
}

#[test]
fn test_not_a_container() {
    assert!(matches!(decompress(b""), Err(Error::CorruptHeader(_))));
    assert!(matches!(decompress(b"hello world"), Err(Error::CorruptHeader(_))));
    assert_eq!(&compress(b"x")[..4], &MAGIC);
}

#[test]
fn test_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let compressed = compress(&data);
    let container = Container::decode(&compressed).unwrap();
    assert_eq!(container.frequencies.len(), 256);
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_skewed_input_shrinks() {
    let mut data = vec![b'e'; 10_000];
    data.extend(b"xyz".iter().cycle().take(300));
    let compressed = compress(&data);
    assert!(compressed.len() < data.len() / 4);
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_file_roundtrip() {
    let source = scratch_path("source.txt");
    let packed = scratch_path("source.huf");
    let restored = scratch_path("restored.txt");
    let text = b"Huffman encoding is a greedy algorithm that builds optimal prefix codes.";
    fs::write(&source, text).unwrap();

    let stats = compress_file(&source, &packed).unwrap();
    assert_eq!(stats.original_size, text.len() as u64);
    assert_eq!(stats.compressed_size, fs::metadata(&packed).unwrap().len());

    let restored_stats = decompress_file(&packed, &restored).unwrap();
    assert_eq!(restored_stats.original_size, text.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), text);

    for path in [source, packed, restored] {
        let _ = fs::remove_file(path);
    }
}

#[test]
fn test_missing_input_file_is_io_error() {
    let missing = scratch_path("does-not-exist");
    let out = scratch_path("never-written");
    assert!(matches!(compress_file(&missing, &out), Err(Error::Io(_))));
    assert!(matches!(decompress_file(&missing, &out), Err(Error::Io(_))));
}

#[test]
fn test_corrupt_file_writes_nothing() {
    let packed = scratch_path("corrupt.huf");
    let out = scratch_path("corrupt.out");
    fs::write(&packed, b"HUFP\x01garbage").unwrap();
    let _ = fs::remove_file(&out);

    assert!(decompress_file(&packed, &out).is_err());
    assert!(!out.exists());

    let _ = fs::remove_file(packed);
}
