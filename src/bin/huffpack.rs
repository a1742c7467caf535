use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use huffpack::{compress_file, decompress_file, CompressionStats, FrequencyTable, HuffmanEncoder};

fn usage(progname: &str) -> ExitCode {
    eprintln!("usage: {progname} compress <input> <output>");
    eprintln!("       {progname} decompress <input> <output>");
    eprintln!("       {progname} codes <input>");
    ExitCode::from(2)
}

fn print_codes(input: &Path) -> huffpack::Result<()> {
    let data = fs::read(input)?;
    let frequencies = FrequencyTable::from_bytes(&data);
    let encoder = HuffmanEncoder::new(&frequencies);
    for (symbol, code) in encoder.codes().iter() {
        let count = frequencies.get(symbol).unwrap_or(0);
        if symbol.is_ascii_graphic() {
            println!("{:>3} '{}' {:>10} {}", symbol, symbol as char, count, code);
        } else {
            println!("{:>3}     {:>10} {}", symbol, count, code);
        }
    }
    Ok(())
}

fn print_stats(stats: &CompressionStats) {
    println!("original size:   {} bytes", stats.original_size);
    println!("compressed size: {} bytes", stats.compressed_size);
    println!("distinct bytes:  {}", stats.distinct_symbols);
    match stats.ratio() {
        Some(ratio) => println!("ratio:           {:.1}%", ratio * 100.0),
        None => println!("ratio:           n/a"),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let progname = args.first().map(String::as_str).unwrap_or("huffpack");

    let result = match args.get(1..).unwrap_or_default() {
        [cmd, input, output] if cmd == "compress" => {
            compress_file(Path::new(input), Path::new(output)).map(|stats| print_stats(&stats))
        }
        [cmd, input, output] if cmd == "decompress" => {
            decompress_file(Path::new(input), Path::new(output))
                .map(|stats| println!("restored {} bytes", stats.original_size))
        }
        [cmd, input] if cmd == "codes" => print_codes(Path::new(input)),
        _ => return usage(progname),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{progname}: {err}");
            ExitCode::FAILURE
        }
    }
}
