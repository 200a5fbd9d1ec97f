//! Info command implementation.

use crate::utils::{format_size, read_input};
use oxifloat_codec::{FLOATS_PER_BLOCK, stream_info};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct InfoReport {
    epsilon: f32,
    float_count: u32,
    blocks: usize,
    stored: bool,
    compressed_bytes: u64,
    framed_bytes: u64,
    original_bytes: u64,
    block_used_words: Vec<u32>,
}

pub fn cmd_info(input: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let compressed = read_input(input)?;
    let info = stream_info(&compressed)?;

    let report = InfoReport {
        epsilon: info.epsilon,
        float_count: info.float_count,
        blocks: info.block_count(),
        stored: info.stored,
        compressed_bytes: compressed.len() as u64,
        framed_bytes: info.framed_len(),
        original_bytes: u64::from(info.float_count) * 4,
        block_used_words: info.block_used_words.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Floats:       {}", report.float_count);
    println!(
        "Blocks:       {} ({} floats each)",
        report.blocks, FLOATS_PER_BLOCK
    );
    println!("Epsilon:      {}", report.epsilon);
    println!(
        "Entropy:      {}",
        if report.stored { "stored" } else { "zstd" }
    );
    println!("Original:     {}", format_size(report.original_bytes));
    println!("Framed:       {}", format_size(report.framed_bytes));
    println!(
        "Compressed:   {} ({:.2}x)",
        format_size(report.compressed_bytes),
        report.original_bytes as f64 / report.compressed_bytes as f64
    );

    let packed_total: u64 = report.block_used_words.iter().map(|&w| u64::from(w) * 4).sum();
    println!("Packed words: {}", format_size(packed_total));
    Ok(())
}
