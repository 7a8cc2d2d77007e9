//! Demonstration harness for the SPOE varint codec.
//!
//! Encodes each value, prints the encoded bytes, decodes them back and
//! prints the result. With no arguments it runs the boundary values of
//! every length class up to 6 bytes, plus `u64::MAX`.
//!
//! ```text
//! varint-demo [--json] [VALUE ...]
//! ```

use std::process::ExitCode;

use serde::Serialize;
use spoe_varint::{MAX_VARINT_BYTES, decode_varint, encode_varint};

/// Values exercised when none are given on the command line.
const DEFAULT_VALUES: &[u64] = &[
    0,          // Min value
    239,        // Max 1-byte value
    240,        // Min 2-byte value
    241,
    250,
    300,
    2287,       // Max 2-byte value
    2288,       // Min 3-byte value
    2420,
    264431,     // Max 3-byte value
    264432,     // Min 4-byte value
    1572912,
    33818863,   // Max 4-byte value
    33818864,   // Min 5-byte value
    281374384,
    4328786159, // Max 5-byte value
    4328786160, // Min 6-byte value
    4328786161,
    u64::MAX,   // Max possible value
];

const SEPARATOR: &str = "--------------------------------------------------";

// =============================================================================
// OPTIONS
// =============================================================================

#[derive(Debug, PartialEq)]
struct Options {
    json: bool,
    values: Vec<u64>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options, String> {
    let mut json = false;
    let mut values = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            flag if flag.starts_with('-') => return Err(format!("unknown option: {}", flag)),
            value => {
                let parsed = value
                    .parse::<u64>()
                    .map_err(|e| format!("invalid value {:?}: {}", value, e))?;
                values.push(parsed);
            }
        }
    }
    if values.is_empty() {
        values = DEFAULT_VALUES.to_vec();
    }
    Ok(Options { json, values })
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Serialize)]
struct Report {
    value: u64,
    encoded: String,
    len: usize,
    decoded: Option<u64>,
}

fn run(value: u64) -> Report {
    let mut buf = [0u8; MAX_VARINT_BYTES];
    let len = encode_varint(value, &mut buf);
    let encoded = &buf[..len];
    let decoded = decode_varint(encoded).ok().map(|(v, _)| v);

    Report {
        value,
        encoded: encoded.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" "),
        len,
        decoded,
    }
}

fn print_text(report: &Report) {
    println!("Value: {}", report.value);
    println!("Encoded ({} bytes): {} ", report.len, report.encoded);
    match report.decoded {
        Some(decoded) => println!("Decoded: {}", decoded),
        None => println!("Decoding failed!"),
    }
    println!("{}", SEPARATOR);
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("usage: varint-demo [--json] [VALUE ...]");
            return ExitCode::from(2);
        }
    };

    let reports: Vec<Report> = options.values.iter().copied().map(run).collect();

    if options.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            print_text(report);
        }
    }

    if reports.iter().any(|r| r.decoded != Some(r.value)) {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
