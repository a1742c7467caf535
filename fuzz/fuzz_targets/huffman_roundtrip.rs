#![no_main]
use huffpack::{compress, decompress, Container};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let compressed = compress(data);

    let container = Container::decode(&compressed).unwrap();
    assert!(container.padding <= 7);
    assert_eq!(container.original_len(), data.len() as u64);

    let output = decompress(&compressed).unwrap();
    assert_eq!(data, &output[..]);
});
