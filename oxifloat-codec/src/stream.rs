//! Stream framer: global header, block table, and the entropy stage.
//!
//! The framed stream is
//!
//! ```text
//! magic (u32 LE)  epsilon (f32 LE)  float_count (u32 LE)
//! used_words[0..blocks] (u32 LE each)
//! block 0 image ... block B-1 image
//! ```
//!
//! and the whole of it - header included - is fed through a streaming
//! entropy stage as one logical input. Decode therefore runs the entropy
//! decoder incrementally: first the fixed 12-byte prefix, then the block
//! table, then each block image at exactly the size the table declares.
//! The stage is recognised from the first four bytes of the compressed
//! buffer: a Zstandard frame magic, or the stream's own magic when it was
//! stored unencoded.

use crate::block::{self, BLOCK_PARAM_BYTES, EncodedBlock, MAX_WORDS_PER_BLOCK};
use crate::{ENTROPY_LEVEL, FLOATS_PER_BLOCK, MAGIC};
use oxifloat_core::error::{OxiFloatError, Result};
use oxifloat_core::traits::{DecodeStatus, EntropyDecoder, EntropyEncoder};
use oxifloat_entropy::{StoredDecoder, StoredEncoder, ZSTD_MAGIC, ZstdDecoder, ZstdEncoder};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fixed bytes before the block table: magic, epsilon, float count.
pub const HEADER_PREFIX_BYTES: usize = 12;

/// Error-bounded stream encoder.
///
/// Carries the quantization step and stage selection; [`compress`] is the
/// one-call convenience wrapper with default settings.
#[derive(Debug, Clone)]
pub struct EpsilonEncoder {
    epsilon: f32,
    store: bool,
}

impl EpsilonEncoder {
    /// Create an encoder with the given quantization step.
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            store: false,
        }
    }

    /// Bypass the entropy stage and emit the framed stream as-is.
    pub fn set_store(&mut self, store: bool) -> &mut Self {
        self.store = store;
        self
    }

    /// Compress `data` into a self-describing byte stream.
    pub fn compress(&self, data: &[f32]) -> Result<Vec<u8>> {
        let framed = self.frame(data)?;
        if self.store {
            StoredEncoder::new().encode_all(&framed)
        } else {
            ZstdEncoder::new(ENTROPY_LEVEL)?.encode_all(&framed)
        }
    }

    /// Build the framed stream (header, block table, block images) without
    /// running the entropy stage.
    pub fn frame(&self, data: &[f32]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(OxiFloatError::EmptyInput);
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(OxiFloatError::InvalidEpsilon {
                value: self.epsilon,
            });
        }
        if u32::try_from(data.len()).is_err() {
            return Err(OxiFloatError::TooManyFloats { count: data.len() });
        }

        let blocks = encode_blocks(data, 1.0 / self.epsilon);

        let body: usize = blocks.iter().map(EncodedBlock::byte_len).sum();
        let mut out = Vec::with_capacity(HEADER_PREFIX_BYTES + blocks.len() * 4 + body);
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.extend_from_slice(&self.epsilon.to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        for b in &blocks {
            out.extend_from_slice(&b.used_words().to_le_bytes());
        }
        for b in &blocks {
            b.write_into(&mut out);
        }
        Ok(out)
    }
}

#[cfg(feature = "parallel")]
fn encode_blocks(data: &[f32], inv_epsilon: f32) -> Vec<EncodedBlock> {
    data.par_chunks(FLOATS_PER_BLOCK)
        .map(|chunk| block::encode_block(chunk, inv_epsilon))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn encode_blocks(data: &[f32], inv_epsilon: f32) -> Vec<EncodedBlock> {
    data.chunks(FLOATS_PER_BLOCK)
        .map(|chunk| block::encode_block(chunk, inv_epsilon))
        .collect()
}

/// Compress a float array with the default entropy stage.
pub fn compress(data: &[f32], epsilon: f32) -> Result<Vec<u8>> {
    EpsilonEncoder::new(epsilon).compress(data)
}

/// Decompress a byte stream produced by [`compress`] or
/// [`EpsilonEncoder::compress`].
pub fn decompress(bytes: &[u8]) -> Result<Vec<f32>> {
    let mut reader = StageReader::new(bytes)?;
    let header = Header::parse(&mut reader)?;

    let mut images = Vec::with_capacity(header.used_words.len());
    for &used in &header.used_words {
        let len = BLOCK_PARAM_BYTES + used as usize * 4;
        let at = reader.produced;
        images.push((at, reader.read_exact(len)?));
    }

    let decoded = decode_blocks(&images, header.epsilon)?;
    let mut floats: Vec<f32> = decoded.into_iter().flatten().collect();
    floats.truncate(header.float_count as usize);
    Ok(floats)
}

#[cfg(feature = "parallel")]
fn decode_blocks(images: &[(u64, Vec<u8>)], epsilon: f32) -> Result<Vec<Vec<f32>>> {
    images
        .par_iter()
        .map(|(at, image)| block::decode_block(image, epsilon, *at))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn decode_blocks(images: &[(u64, Vec<u8>)], epsilon: f32) -> Result<Vec<Vec<f32>>> {
    images
        .iter()
        .map(|(at, image)| block::decode_block(image, epsilon, *at))
        .collect()
}

/// Summary of a compressed stream, recovered without decoding any block.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Quantization step the stream was encoded with.
    pub epsilon: f32,
    /// Number of floats the stream reproduces.
    pub float_count: u32,
    /// Packed words per block.
    pub block_used_words: Vec<u32>,
    /// Whether the framed stream was stored without an entropy stage.
    pub stored: bool,
}

impl StreamInfo {
    /// Number of blocks in the stream.
    pub fn block_count(&self) -> usize {
        self.block_used_words.len()
    }

    /// Size of the framed (pre-entropy) stream in bytes.
    pub fn framed_len(&self) -> u64 {
        let body: u64 = self
            .block_used_words
            .iter()
            .map(|&w| (BLOCK_PARAM_BYTES + w as usize * 4) as u64)
            .sum();
        HEADER_PREFIX_BYTES as u64 + self.block_used_words.len() as u64 * 4 + body
    }
}

/// Probe a compressed stream's header and block table.
pub fn stream_info(bytes: &[u8]) -> Result<StreamInfo> {
    let mut reader = StageReader::new(bytes)?;
    let stored = reader.stored;
    let header = Header::parse(&mut reader)?;
    Ok(StreamInfo {
        epsilon: header.epsilon,
        float_count: header.float_count,
        block_used_words: header.used_words,
        stored,
    })
}

struct Header {
    epsilon: f32,
    float_count: u32,
    used_words: Vec<u32>,
}

impl Header {
    fn parse(reader: &mut StageReader<'_>) -> Result<Self> {
        let prefix = reader.read_exact(HEADER_PREFIX_BYTES)?;
        let magic = read_u32_le(&prefix, 0);
        if magic != MAGIC {
            return Err(OxiFloatError::invalid_magic(MAGIC, magic));
        }
        let epsilon = f32::from_le_bytes([prefix[4], prefix[5], prefix[6], prefix[7]]);
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(OxiFloatError::corrupted_stream(
                4,
                format!("epsilon {epsilon} is not a positive finite value"),
            ));
        }
        let float_count = read_u32_le(&prefix, 8);
        if float_count == 0 {
            return Err(OxiFloatError::corrupted_stream(8, "zero float count"));
        }

        let blocks = (float_count as usize).div_ceil(FLOATS_PER_BLOCK);
        let table = reader.read_exact(blocks * 4)?;
        let mut used_words = Vec::with_capacity(blocks);
        for b in 0..blocks {
            let used = read_u32_le(&table, b * 4);
            if used > MAX_WORDS_PER_BLOCK {
                return Err(OxiFloatError::corrupted_stream(
                    (HEADER_PREFIX_BYTES + b * 4) as u64,
                    format!("block {b} claims {used} packed words"),
                ));
            }
            used_words.push(used);
        }

        Ok(Self {
            epsilon,
            float_count,
            used_words,
        })
    }
}

fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Incremental view of the framed stream through its entropy stage.
struct StageReader<'a> {
    decoder: Box<dyn EntropyDecoder>,
    input: &'a [u8],
    pos: usize,
    /// Framed-stream bytes handed out so far; used for error offsets.
    produced: u64,
    stored: bool,
}

impl<'a> StageReader<'a> {
    fn new(input: &'a [u8]) -> Result<Self> {
        if input.len() < HEADER_PREFIX_BYTES {
            return Err(OxiFloatError::input_too_short(
                HEADER_PREFIX_BYTES,
                input.len(),
            ));
        }
        let (decoder, stored): (Box<dyn EntropyDecoder>, bool) = if input[..4] == ZSTD_MAGIC {
            (Box::new(ZstdDecoder::new()?), false)
        } else if input[..4] == MAGIC.to_le_bytes() {
            (Box::new(StoredDecoder::new()), true)
        } else {
            return Err(OxiFloatError::invalid_magic(
                MAGIC,
                read_u32_le(input, 0),
            ));
        };
        Ok(Self {
            decoder,
            input,
            pos: 0,
            produced: 0,
            stored,
        })
    }

    /// Decode exactly `len` framed-stream bytes, or fail on a truncated or
    /// prematurely finished entropy frame. Never reads past the input.
    fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        let mut filled = 0usize;
        while filled < len {
            let (consumed, produced, status) = self
                .decoder
                .decode(&self.input[self.pos..], &mut out[filled..])?;
            self.pos += consumed;
            filled += produced;
            if filled >= len {
                break;
            }
            match status {
                DecodeStatus::FrameEnd => {
                    return Err(OxiFloatError::input_too_short(len, filled));
                }
                _ if consumed == 0 && produced == 0 => {
                    // No forward progress is possible: the input ran dry.
                    return Err(OxiFloatError::input_too_short(len, filled));
                }
                _ => {}
            }
        }
        self.produced += len as u64;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32 * 0.25).collect()
    }

    #[test]
    fn test_framed_header_layout() {
        let data = ramp(FLOATS_PER_BLOCK + 1);
        let framed = EpsilonEncoder::new(0.5).frame(&data).unwrap();
        assert_eq!(read_u32_le(&framed, 0), MAGIC);
        assert_eq!(
            f32::from_le_bytes([framed[4], framed[5], framed[6], framed[7]]),
            0.5
        );
        assert_eq!(read_u32_le(&framed, 8), (FLOATS_PER_BLOCK + 1) as u32);
        // Two blocks, so two table entries before the first image.
        let used0 = read_u32_le(&framed, 12);
        let used1 = read_u32_le(&framed, 16);
        let body = framed.len() - HEADER_PREFIX_BYTES - 8;
        assert_eq!(
            body,
            2 * BLOCK_PARAM_BYTES + (used0 as usize + used1 as usize) * 4
        );
    }

    #[test]
    fn test_store_mode_begins_with_stream_magic() {
        let mut encoder = EpsilonEncoder::new(0.1);
        encoder.set_store(true);
        let bytes = encoder.compress(&ramp(100)).unwrap();
        assert_eq!(read_u32_le(&bytes, 0), MAGIC);
        assert_eq!(bytes, encoder.frame(&ramp(100)).unwrap());
    }

    #[test]
    fn test_default_mode_begins_with_zstd_magic() {
        let bytes = compress(&ramp(100), 0.1).unwrap();
        assert_eq!(&bytes[..4], &ZSTD_MAGIC);
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(
            compress(&[], 0.1),
            Err(OxiFloatError::EmptyInput)
        ));
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        for eps in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                compress(&[1.0], eps),
                Err(OxiFloatError::InvalidEpsilon { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_unknown_magic() {
        let err = decompress(&[0xFFu8; 32]).unwrap_err();
        assert!(matches!(err, OxiFloatError::InvalidMagic { .. }));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = decompress(&[0x28, 0xB5, 0x2F]).unwrap_err();
        assert!(matches!(err, OxiFloatError::InputTooShort { .. }));
    }

    #[test]
    fn test_stream_info_matches_frame() {
        let data = ramp(2 * FLOATS_PER_BLOCK + 77);
        let bytes = compress(&data, 0.25).unwrap();
        let info = stream_info(&bytes).unwrap();
        assert_eq!(info.epsilon, 0.25);
        assert_eq!(info.float_count, data.len() as u32);
        assert_eq!(info.block_count(), 3);
        assert!(!info.stored);

        let framed = EpsilonEncoder::new(0.25).frame(&data).unwrap();
        assert_eq!(info.framed_len(), framed.len() as u64);
    }
}
