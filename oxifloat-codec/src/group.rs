//! Quantization-group coder.
//!
//! A group is a run of 32 consecutive values sharing one parameter triple.
//! Encoding a group:
//!
//! 1. `q = round_half_to_even(f * (1/epsilon))` - ties to even match the
//!    inverse `q * epsilon` in expectation, minimising quantizer bias.
//! 2. `r = zigzag(q - q_prev)` against the worker's running previous
//!    quantized value, so small magnitudes map to small unsigned residuals.
//! 3. Scan the 32 residuals for the largest value `max1` (first occurrence
//!    wins on ties - the position is part of the format) and the
//!    second-largest `max2`.
//! 4. `bits = 32 - clz(max2)`: the width every residual except the single
//!    exception fits in.
//! 5. `high = max1 >> bits`: the exception's upper part, stored in the
//!    parameter table; its low `bits` travel with the packed group like any
//!    other residual.
//!
//! Decoding rebuilds the exception lane wholesale from `high` and the
//! lane's packed low bits, so nothing above the group's bit width ever
//! leaks through the slices.

use crate::QUANT_GROUP;

/// Parameter triple carried by every quantization group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupParams {
    /// Lane of the largest residual within the group (0-31).
    pub max_index: u8,
    /// Bit width sufficient for every residual except the exception (0-32).
    pub bits: u8,
    /// Upper part of the exception: `max1 >> bits`.
    pub high: u32,
}

/// Map a signed delta so small magnitudes get small unsigned values.
#[inline]
pub(crate) fn zigzag(n: i32) -> u32 {
    ((n as u32) << 1) ^ ((n >> 31) as u32)
}

/// Inverse of [`zigzag`].
#[inline]
pub(crate) fn unzigzag(u: u32) -> i32 {
    ((u >> 1) ^ (u & 1).wrapping_neg()) as i32
}

/// Rebuild an exception from its upper part and its packed low bits.
///
/// `low` is the exception lane as it came off the inverse transpose,
/// already confined to the group's bit width; `bits` may be 0 (the whole
/// exception lives in `high`) or 32 (it lives entirely in the lane).
#[inline]
pub(crate) fn exception_value(bits: u8, high: u32, low: u32) -> u32 {
    ((u64::from(high) << bits) | u64::from(low)) as u32
}

/// Quantize and delta-code one group of up to 32 values.
///
/// `values` shorter than a full group is padded with zeros, which keeps a
/// trailing partial block well-formed. Returns the 32 residuals and the
/// group's parameter triple; `q_prev` carries the delta chain across the
/// worker's groups.
pub fn encode_group(
    values: &[f32],
    inv_epsilon: f32,
    q_prev: &mut i32,
) -> ([u32; QUANT_GROUP], GroupParams) {
    debug_assert!(values.len() <= QUANT_GROUP);

    let mut residuals = [0u32; QUANT_GROUP];
    for (slot, lane) in residuals.iter_mut().enumerate() {
        let f = values.get(slot).copied().unwrap_or(0.0);
        let q = (f * inv_epsilon).round_ties_even() as i32;
        *lane = zigzag(q.wrapping_sub(*q_prev));
        *q_prev = q;
    }

    let mut max1 = 0u32;
    let mut max2 = 0u32;
    let mut max_index = 0usize;
    for (slot, &r) in residuals.iter().enumerate() {
        if r > max1 {
            max2 = max1;
            max1 = r;
            max_index = slot;
        } else if r > max2 {
            max2 = r;
        }
    }

    let bits = 32 - max2.leading_zeros();
    let high = (u64::from(max1) >> bits) as u32;

    (
        residuals,
        GroupParams {
            max_index: max_index as u8,
            bits: bits as u8,
            high,
        },
    )
}

/// Invert one group: exception restore, inverse zigzag, delta prefix scan,
/// and dequantization into `out` (exactly 32 lanes).
///
/// `residuals` is the group as it came off the inverse transpose, all-zero
/// when `bits == 0`. The caller validates `max_index < 32`.
pub fn decode_group(
    residuals: &mut [u32; QUANT_GROUP],
    params: &GroupParams,
    epsilon: f32,
    q_prev: &mut i32,
    out: &mut [f32],
) {
    debug_assert_eq!(out.len(), QUANT_GROUP);

    let lane = params.max_index as usize;
    residuals[lane] = exception_value(params.bits, params.high, residuals[lane]);

    for (slot, &r) in residuals.iter().enumerate() {
        let q = q_prev.wrapping_add(unzigzag(r));
        *q_prev = q;
        out[slot] = q as f32 * epsilon;
    }
}
