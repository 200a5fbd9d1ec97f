//! Stored (passthrough) entropy stage.
//!
//! Copies bytes through unchanged. The framed stream is its own "frame",
//! so the decoder reports neither frame boundaries nor errors; callers
//! terminate by byte count, exactly as they do for real entropy frames.

use oxifloat_core::error::Result;
use oxifloat_core::traits::{DecodeStatus, EncodeStatus, EntropyDecoder, EntropyEncoder, Flush};

/// Identity encoder: output equals input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredEncoder;

impl StoredEncoder {
    /// Create a stored encoder.
    pub fn new() -> Self {
        Self
    }
}

impl EntropyEncoder for StoredEncoder {
    fn encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<(usize, usize, EncodeStatus)> {
        let n = input.len().min(output.len());
        output[..n].copy_from_slice(&input[..n]);
        let state = if n < input.len() {
            EncodeStatus::NeedsOutput
        } else if flush == Flush::Finish {
            EncodeStatus::Done
        } else {
            EncodeStatus::NeedsInput
        };
        Ok((n, n, state))
    }
}

/// Identity decoder: output equals input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredDecoder;

impl StoredDecoder {
    /// Create a stored decoder.
    pub fn new() -> Self {
        Self
    }
}

impl EntropyDecoder for StoredDecoder {
    fn decode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecodeStatus)> {
        let n = input.len().min(output.len());
        output[..n].copy_from_slice(&input[..n]);
        let state = if n < input.len() {
            DecodeStatus::NeedsOutput
        } else {
            DecodeStatus::NeedsInput
        };
        Ok((n, n, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_roundtrip() {
        let data = b"no entropy stage at all";
        let encoded = StoredEncoder::new().encode_all(data).unwrap();
        assert_eq!(encoded, data);

        let mut out = vec![0u8; data.len()];
        let (consumed, produced, _) = StoredDecoder::new().decode(&encoded, &mut out).unwrap();
        assert_eq!(consumed, data.len());
        assert_eq!(produced, data.len());
        assert_eq!(out, data);
    }

    #[test]
    fn test_stored_respects_output_window() {
        let data = [1u8, 2, 3, 4, 5];
        let mut out = [0u8; 2];
        let (consumed, produced, state) = StoredDecoder::new().decode(&data, &mut out).unwrap();
        assert_eq!((consumed, produced), (2, 2));
        assert_eq!(state, DecodeStatus::NeedsOutput);
        assert_eq!(out, [1, 2]);
    }
}
