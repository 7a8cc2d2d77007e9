//! Simple decoder to inspect a run of SPOE varints given as hex.
//!
//! ```text
//! cargo run --example decode_hex -- "F0 80 00 07 FF 7F"
//! ```

use spoe_varint::{DecodeError, Reader};

fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            u8::from_str_radix(&s, 16).map_err(|_| format!("invalid hex byte {:?}", s))
        })
        .collect()
}

fn format_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "00 EF F0 00 FF 7F F0 80 00".to_string());

    let data = parse_hex(&input).expect("Failed to parse hex input");
    println!("Input: {} bytes", data.len());

    let mut reader = Reader::new(&data);
    let mut count = 0;
    while !reader.is_empty() {
        let offset = reader.position();
        match reader.read_varint("varint") {
            Ok(value) => {
                let encoded = &data[offset..reader.position()];
                println!("[{:>4}] {:<32} = {}", offset, format_bytes(encoded), value);
                count += 1;
            }
            Err(err @ DecodeError::OutOfBounds { .. }) => {
                println!("[{:>4}] {:<32} ! {}", offset, format_bytes(reader.remaining()), err);
                break;
            }
            Err(err) => panic!("unexpected error: {}", err),
        }
    }

    println!("\nDecoded {} value(s)", count);
}
