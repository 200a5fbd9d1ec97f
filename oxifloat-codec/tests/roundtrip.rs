//! End-to-end round-trip tests for the float codec.

use oxifloat_codec::{
    EpsilonEncoder, FLOATS_PER_BLOCK, compress, decompress, stream_info,
};

/// Reproducible pseudo-random signal mixing smooth drift, noise, and
/// occasional spikes.
fn signal(len: usize) -> Vec<f32> {
    let mut state: u64 = 0x1234_5678_9ABC_DEF0;
    (0..len)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let noise = ((state >> 33) as f32 / (1u64 << 31) as f32) - 0.5;
            let spike = if state % 127 == 0 { -3000.0 } else { 0.0 };
            (i as f32 * 0.01).cos() * 100.0 + noise * 4.0 + spike
        })
        .collect()
}

fn assert_within(original: &[f32], decoded: &[f32], epsilon: f32) {
    assert_eq!(original.len(), decoded.len());
    for (i, (a, b)) in original.iter().zip(decoded).enumerate() {
        assert!(
            (a - b).abs() <= epsilon,
            "element {i}: {a} vs {b} exceeds {epsilon}"
        );
    }
}

#[test]
fn test_zeros_single_block() {
    let data = vec![0.0f32; FLOATS_PER_BLOCK];
    let bytes = compress(&data, 0.01).unwrap();
    let decoded = decompress(&bytes).unwrap();
    assert_eq!(decoded, data);

    let info = stream_info(&bytes).unwrap();
    assert_eq!(info.block_count(), 1);
    assert_eq!(info.block_used_words, [0]);
    // Header prefix, one table entry, one empty-packed parameter table.
    assert_eq!(info.framed_len(), 12 + 4 + 1024 * 6);
}

#[test]
fn test_constant_nonzero() {
    let data = vec![1.0f32; 128];
    let bytes = compress(&data, 1.0).unwrap();
    let decoded = decompress(&bytes).unwrap();
    // Deltas after the chain head are zero, so reconstruction is exact.
    assert_eq!(decoded, data);
    assert_eq!(stream_info(&bytes).unwrap().block_used_words, [0]);
}

#[test]
fn test_linear_ramp() {
    let data: Vec<f32> = (0..128).map(|i| i as f32).collect();
    let bytes = compress(&data, 1.0).unwrap();
    let decoded = decompress(&bytes).unwrap();
    assert_within(&data, &decoded, 1.0);
}

#[test]
fn test_single_spike() {
    let mut data = vec![0.0f32; 32];
    data[31] = 1000.0;
    let bytes = compress(&data, 1.0).unwrap();
    let decoded = decompress(&bytes).unwrap();
    assert_eq!(decoded[31], 1000.0);
    assert_within(&data, &decoded, 1.0);
}

#[test]
fn test_cross_block_boundary() {
    let data = signal(FLOATS_PER_BLOCK + 1);
    let epsilon = 0.05f32;
    let bytes = compress(&data, epsilon).unwrap();
    let info = stream_info(&bytes).unwrap();
    assert_eq!(info.block_count(), 2);

    let decoded = decompress(&bytes).unwrap();
    assert_eq!(decoded.len(), FLOATS_PER_BLOCK + 1);
    assert_within(&data, &decoded, epsilon);
}

#[test]
fn test_multi_block_roundtrip() {
    let data = signal(3 * FLOATS_PER_BLOCK + 4321);
    let epsilon = 0.01f32;
    let decoded = decompress(&compress(&data, epsilon).unwrap()).unwrap();
    assert_within(&data, &decoded, epsilon);
}

#[test]
fn test_short_inputs() {
    for len in [1usize, 2, 31, 32, 33, 127, 128, 129] {
        let data = signal(len);
        let epsilon = 0.001f32;
        let decoded = decompress(&compress(&data, epsilon).unwrap()).unwrap();
        assert_eq!(decoded.len(), len, "length {len}");
        assert_within(&data, &decoded, epsilon);
    }
}

#[test]
fn test_epsilon_idempotence() {
    let data = signal(5000);
    let epsilon = 0.02f32;
    let once = decompress(&compress(&data, epsilon).unwrap()).unwrap();
    let twice = decompress(&compress(&once, epsilon).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_store_and_zstd_agree() {
    let data = signal(10_000);
    let epsilon = 0.1f32;
    let via_zstd = decompress(&compress(&data, epsilon).unwrap()).unwrap();

    let mut encoder = EpsilonEncoder::new(epsilon);
    encoder.set_store(true);
    let via_store = decompress(&encoder.compress(&data).unwrap()).unwrap();
    assert_eq!(via_zstd, via_store);
}

#[test]
fn test_truncated_stream_fails() {
    let data = signal(1000);
    let bytes = compress(&data, 0.01).unwrap();
    let truncated = &bytes[..bytes.len() - 1];
    assert!(decompress(truncated).is_err());
}

#[test]
fn test_every_truncation_of_short_stream_fails() {
    let data = signal(64);
    let bytes = compress(&data, 0.5).unwrap();
    for cut in 0..bytes.len() {
        assert!(decompress(&bytes[..cut]).is_err(), "cut at {cut}");
    }
}

#[test]
fn test_negative_values() {
    let data: Vec<f32> = (0..500).map(|i| -(i as f32) * 0.75).collect();
    let epsilon = 0.001f32;
    let decoded = decompress(&compress(&data, epsilon).unwrap()).unwrap();
    assert_within(&data, &decoded, epsilon);
}

#[test]
fn test_tiny_epsilon_large_values() {
    // Wide residuals push groups toward the full 32-bit width.
    let data: Vec<f32> = (0..256)
        .map(|i| if i % 2 == 0 { 1.0e6 } else { -1.0e6 })
        .collect();
    let epsilon = 1.0e-3f32;
    let decoded = decompress(&compress(&data, epsilon).unwrap()).unwrap();
    // Quantized magnitudes are ~1e9, still exactly representable in i32;
    // the bound degrades to float rounding of q * epsilon.
    for (a, b) in data.iter().zip(&decoded) {
        assert!((a - b).abs() <= 128.0, "{a} vs {b}");
    }
}
