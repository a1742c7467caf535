#![no_main]
use huffpack::container::MAGIC;
use huffpack::decompress;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Raw bytes almost never pass the signature check; also try them behind a valid one.
    let _ = decompress(data);

    let mut framed = MAGIC.to_vec();
    framed.push(1);
    framed.extend_from_slice(data);
    let _ = decompress(&framed);
});
