//! Block coder: parameter table layout and packed-word allocation.
//!
//! A block covers 32768 consecutive values: 256 workers of 4 groups each.
//! Its serialized image is laid out as
//!
//! ```text
//! offset 0      max_index[0..1024]   1 byte each
//! offset 1024   bits[0..1024]        1 byte each
//! offset 2048   high[0..1024]        4 bytes LE each
//! offset 6144   packed residuals     32-bit LE words, groups back to back
//! ```
//!
//! with parameter index `worker * GROUPS_PER_WORKER + group`, so one
//! worker's parameters are contiguous. A group of width `bits` occupies
//! exactly `bits` packed words; worker word offsets are the exclusive
//! prefix sum of the per-worker totals, and the inclusive total is the
//! block's `used_words` entry in the global header.
//!
//! Encoding runs as three ordered phases - parameters, prefix sum, pack -
//! because packing may not begin until every group's width is known. The
//! decode side replays the prefix sum from the parameter table, which is
//! why the offsets never need to be serialized.

use crate::group::{self, GroupParams};
use crate::{FLOATS_PER_BLOCK, GROUPS_PER_WORKER, PARAM_BYTES, PARAMS_PER_BLOCK, QUANT_GROUP, WORKERS_PER_BLOCK};
use oxifloat_core::error::{OxiFloatError, Result};
use oxifloat_core::interleave::{deinterleave, interleave};

/// Serialized size of a block's parameter table.
pub const BLOCK_PARAM_BYTES: usize = PARAMS_PER_BLOCK * PARAM_BYTES;

/// Upper bound on packed words in one block (every group at full width).
pub const MAX_WORDS_PER_BLOCK: u32 = (PARAMS_PER_BLOCK * QUANT_GROUP) as u32;

/// One encoded block: parameter table plus packed residual words.
#[derive(Debug, Clone)]
pub struct EncodedBlock {
    max_index: Vec<u8>,
    bits: Vec<u8>,
    high: Vec<u32>,
    packed: Vec<u32>,
}

impl EncodedBlock {
    /// Packed words in this block; the value recorded in the stream header.
    pub fn used_words(&self) -> u32 {
        self.packed.len() as u32
    }

    /// Serialized size of this block in bytes.
    pub fn byte_len(&self) -> usize {
        BLOCK_PARAM_BYTES + self.packed.len() * 4
    }

    /// Append the block image (parameter table, then packed words) to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.max_index);
        out.extend_from_slice(&self.bits);
        for &h in &self.high {
            out.extend_from_slice(&h.to_le_bytes());
        }
        for &w in &self.packed {
            out.extend_from_slice(&w.to_le_bytes());
        }
    }
}

/// Encode one block of up to [`FLOATS_PER_BLOCK`] values.
///
/// A short tail (the stream's final block) is padded with zeros; decode
/// discards the padding by element count.
pub fn encode_block(floats: &[f32], inv_epsilon: f32) -> EncodedBlock {
    assert!(floats.len() <= FLOATS_PER_BLOCK);

    let mut max_index = vec![0u8; PARAMS_PER_BLOCK];
    let mut bits = vec![0u8; PARAMS_PER_BLOCK];
    let mut high = vec![0u32; PARAMS_PER_BLOCK];
    let mut residuals = vec![[0u32; QUANT_GROUP]; PARAMS_PER_BLOCK];

    // Phase 1: quantize and compute group parameters. Each worker owns a
    // contiguous run of 128 values and one delta chain.
    for worker in 0..WORKERS_PER_BLOCK {
        let mut q_prev = 0i32;
        for g in 0..GROUPS_PER_WORKER {
            let slot = worker * GROUPS_PER_WORKER + g;
            let start = slot * QUANT_GROUP;
            let end = floats.len().min(start + QUANT_GROUP);
            let values = if start < floats.len() {
                &floats[start..end]
            } else {
                &[][..]
            };
            let (res, params) = group::encode_group(values, inv_epsilon, &mut q_prev);
            residuals[slot] = res;
            max_index[slot] = params.max_index;
            bits[slot] = params.bits;
            high[slot] = params.high;
        }
    }

    // Phase 2: exclusive prefix sum over per-worker word counts.
    let mut offsets = [0u32; WORKERS_PER_BLOCK];
    let mut total = 0u32;
    for (worker, offset) in offsets.iter_mut().enumerate() {
        *offset = total;
        for g in 0..GROUPS_PER_WORKER {
            total += u32::from(bits[worker * GROUPS_PER_WORKER + g]);
        }
    }

    // Phase 3: transpose every group into its packed region.
    let mut packed = vec![0u32; total as usize];
    for worker in 0..WORKERS_PER_BLOCK {
        let mut cursor = offsets[worker] as usize;
        for g in 0..GROUPS_PER_WORKER {
            let slot = worker * GROUPS_PER_WORKER + g;
            let width = usize::from(bits[slot]);
            if width > 0 {
                interleave(
                    &residuals[slot],
                    width as u32,
                    &mut packed[cursor..cursor + width],
                );
                cursor += width;
            }
        }
    }

    EncodedBlock {
        max_index,
        bits,
        high,
        packed,
    }
}

/// Decode one block image into [`FLOATS_PER_BLOCK`] values.
///
/// `offset` is the image's position within the framed stream and is only
/// used to report corruption locations.
pub fn decode_block(image: &[u8], epsilon: f32, offset: u64) -> Result<Vec<f32>> {
    if image.len() < BLOCK_PARAM_BYTES {
        return Err(OxiFloatError::corrupted_stream(
            offset,
            "block image shorter than its parameter table",
        ));
    }
    if (image.len() - BLOCK_PARAM_BYTES) % 4 != 0 {
        return Err(OxiFloatError::corrupted_stream(
            offset,
            "packed region is not a whole number of words",
        ));
    }

    let max_index = &image[..PARAMS_PER_BLOCK];
    let bits = &image[PARAMS_PER_BLOCK..2 * PARAMS_PER_BLOCK];
    let mut high = vec![0u32; PARAMS_PER_BLOCK];
    for (slot, chunk) in image[2 * PARAMS_PER_BLOCK..BLOCK_PARAM_BYTES]
        .chunks_exact(4)
        .enumerate()
    {
        high[slot] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    let packed: Vec<u32> = image[BLOCK_PARAM_BYTES..]
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    // Validate the parameter table and replay the word allocation.
    let mut total = 0usize;
    for slot in 0..PARAMS_PER_BLOCK {
        if usize::from(max_index[slot]) >= QUANT_GROUP {
            return Err(OxiFloatError::corrupted_stream(
                offset + slot as u64,
                format!("exception index {} out of range", max_index[slot]),
            ));
        }
        if u32::from(bits[slot]) > 32 {
            return Err(OxiFloatError::corrupted_stream(
                offset + (PARAMS_PER_BLOCK + slot) as u64,
                format!("bit width {} above 32", bits[slot]),
            ));
        }
        total += usize::from(bits[slot]);
    }
    if total != packed.len() {
        return Err(OxiFloatError::corrupted_stream(
            offset,
            format!(
                "packed region holds {} words but the parameter table allocates {total}",
                packed.len()
            ),
        ));
    }

    let mut out = vec![0f32; FLOATS_PER_BLOCK];
    let mut cursor = 0usize;
    for worker in 0..WORKERS_PER_BLOCK {
        let mut q_prev = 0i32;
        for g in 0..GROUPS_PER_WORKER {
            let slot = worker * GROUPS_PER_WORKER + g;
            let width = usize::from(bits[slot]);
            let mut residuals = if width > 0 {
                let slices = &packed[cursor..cursor + width];
                cursor += width;
                deinterleave(slices, width as u32)
            } else {
                [0u32; QUANT_GROUP]
            };
            let params = GroupParams {
                max_index: max_index[slot],
                bits: bits[slot],
                high: high[slot],
            };
            let lane = slot * QUANT_GROUP;
            group::decode_group(
                &mut residuals,
                &params,
                epsilon,
                &mut q_prev,
                &mut out[lane..lane + QUANT_GROUP],
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reproducible pseudo-random signal with occasional spikes.
    fn signal(len: usize) -> Vec<f32> {
        let mut state: u64 = 0x0DDB_1A5E_5BAD_5EED;
        (0..len)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let noise = ((state >> 33) as f32 / (1u64 << 31) as f32) - 0.5;
                let spike = if state % 97 == 0 { 500.0 } else { 0.0 };
                (i as f32 * 0.05).sin() * 20.0 + noise + spike
            })
            .collect()
    }

    fn roundtrip(floats: &[f32], epsilon: f32) -> Vec<f32> {
        let block = encode_block(floats, 1.0 / epsilon);
        let mut image = Vec::with_capacity(block.byte_len());
        block.write_into(&mut image);
        decode_block(&image, epsilon, 0).unwrap()
    }

    #[test]
    fn test_full_block_roundtrip() {
        let floats = signal(FLOATS_PER_BLOCK);
        let epsilon = 0.001f32;
        let decoded = roundtrip(&floats, epsilon);
        assert_eq!(decoded.len(), FLOATS_PER_BLOCK);
        for (slot, (a, b)) in floats.iter().zip(&decoded).enumerate() {
            assert!((a - b).abs() <= epsilon, "lane {slot}: {a} vs {b}");
        }
    }

    #[test]
    fn test_zero_block_has_no_packed_words() {
        let floats = vec![0.0f32; FLOATS_PER_BLOCK];
        let block = encode_block(&floats, 100.0);
        assert_eq!(block.used_words(), 0);
        assert_eq!(block.byte_len(), BLOCK_PARAM_BYTES);
        assert!(block.bits.iter().all(|&b| b == 0));

        let mut image = Vec::new();
        block.write_into(&mut image);
        let decoded = decode_block(&image, 0.01, 0).unwrap();
        assert!(decoded.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_partial_block_padded_with_zeros() {
        let floats = signal(129); // one worker and one extra value
        let decoded = roundtrip(&floats, 0.01);
        assert_eq!(decoded.len(), FLOATS_PER_BLOCK);
        for (a, b) in floats.iter().zip(&decoded) {
            assert!((a - b).abs() <= 0.01);
        }
        // Fully padded workers decode to exact zeros.
        assert!(decoded[256..].iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_used_words_matches_bit_widths() {
        let floats = signal(FLOATS_PER_BLOCK);
        let block = encode_block(&floats, 1000.0);
        let width_sum: u32 = block.bits.iter().map(|&b| u32::from(b)).sum();
        assert_eq!(block.used_words(), width_sum);
        assert!(block.used_words() <= MAX_WORDS_PER_BLOCK);
    }

    #[test]
    fn test_rejects_short_image() {
        let err = decode_block(&[0u8; 100], 0.01, 0).unwrap_err();
        assert!(err.to_string().contains("parameter table"));
    }

    #[test]
    fn test_rejects_bad_bit_width() {
        let mut image = vec![0u8; BLOCK_PARAM_BYTES];
        image[PARAMS_PER_BLOCK] = 33;
        let err = decode_block(&image, 0.01, 0).unwrap_err();
        assert!(err.to_string().contains("bit width"));
    }

    #[test]
    fn test_rejects_bad_exception_index() {
        let mut image = vec![0u8; BLOCK_PARAM_BYTES];
        image[0] = 32;
        let err = decode_block(&image, 0.01, 0).unwrap_err();
        assert!(err.to_string().contains("exception index"));
    }

    #[test]
    fn test_rejects_word_count_mismatch() {
        let mut image = vec![0u8; BLOCK_PARAM_BYTES + 4];
        image[PARAMS_PER_BLOCK] = 2; // table says 2 words, image carries 1
        let err = decode_block(&image, 0.01, 0).unwrap_err();
        assert!(err.to_string().contains("words"));
    }
}
