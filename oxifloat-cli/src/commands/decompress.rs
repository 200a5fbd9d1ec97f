//! Decompress command implementation.

use crate::utils::{floats_to_bytes, format_size, read_input, write_output};
use oxifloat_codec::decompress;
use std::error::Error;

pub fn cmd_decompress(input: &str, output: &str, verbose: bool) -> Result<(), Box<dyn Error>> {
    let compressed = read_input(input)?;
    let floats = decompress(&compressed)?;
    let raw = floats_to_bytes(&floats);
    write_output(output, &raw)?;

    if verbose {
        eprintln!(
            "{} ({}) -> {} floats ({})",
            input,
            format_size(compressed.len() as u64),
            floats.len(),
            format_size(raw.len() as u64),
        );
    }
    Ok(())
}
