//! Compress command implementation.

use crate::utils::{floats_from_bytes, format_size, read_input, write_output};
use oxifloat_codec::EpsilonEncoder;
use std::error::Error;

pub fn cmd_compress(
    input: &str,
    output: &str,
    epsilon: f32,
    store: bool,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let raw = read_input(input)?;
    let floats = floats_from_bytes(&raw)?;

    let mut encoder = EpsilonEncoder::new(epsilon);
    encoder.set_store(store);
    let compressed = encoder.compress(&floats)?;

    write_output(output, &compressed)?;

    if verbose {
        let ratio = raw.len() as f64 / compressed.len() as f64;
        eprintln!(
            "{} floats ({}) -> {} ({ratio:.2}x), epsilon {epsilon}",
            floats.len(),
            format_size(raw.len() as u64),
            format_size(compressed.len() as u64),
        );
    }
    Ok(())
}
