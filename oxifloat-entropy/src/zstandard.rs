//! Zstandard entropy stage.
//!
//! Wraps libzstd's streaming contexts behind the core entropy traits. One
//! encoder or decoder drives exactly one frame; state is created when the
//! stage is constructed and released when it is dropped, on every exit
//! path.

use oxifloat_core::error::{OxiFloatError, Result};
use oxifloat_core::traits::{DecodeStatus, EncodeStatus, EntropyDecoder, EntropyEncoder, Flush};
use zstd::stream::raw::{Decoder, Encoder, Operation, OutBuffer};

/// Zstandard frame magic number (0xFD2FB528 little-endian).
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

fn entropy_err(err: std::io::Error) -> OxiFloatError {
    OxiFloatError::entropy(err.to_string())
}

/// Streaming Zstandard encoder producing a single frame.
pub struct ZstdEncoder {
    inner: Encoder<'static>,
}

impl ZstdEncoder {
    /// Create an encoder at the given compression level.
    pub fn new(level: i32) -> Result<Self> {
        Ok(Self {
            inner: Encoder::new(level).map_err(entropy_err)?,
        })
    }
}

impl EntropyEncoder for ZstdEncoder {
    fn encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<(usize, usize, EncodeStatus)> {
        let status = self.inner.run_on_buffers(input, output).map_err(entropy_err)?;
        let consumed = status.bytes_read;
        let mut produced = status.bytes_written;

        if flush == Flush::Finish && consumed == input.len() {
            let mut sink = OutBuffer::around(&mut output[produced..]);
            let remaining = self.inner.finish(&mut sink, true).map_err(entropy_err)?;
            produced += sink.pos();
            let state = if remaining == 0 {
                EncodeStatus::Done
            } else {
                EncodeStatus::NeedsOutput
            };
            return Ok((consumed, produced, state));
        }

        let state = if consumed < input.len() {
            EncodeStatus::NeedsOutput
        } else {
            EncodeStatus::NeedsInput
        };
        Ok((consumed, produced, state))
    }
}

/// Streaming Zstandard decoder consuming a single frame.
pub struct ZstdDecoder {
    inner: Decoder<'static>,
}

impl ZstdDecoder {
    /// Create a decoder for one frame.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: Decoder::new().map_err(entropy_err)?,
        })
    }
}

impl EntropyDecoder for ZstdDecoder {
    fn decode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecodeStatus)> {
        let status = self.inner.run_on_buffers(input, output).map_err(entropy_err)?;
        let state = if status.remaining == 0 {
            DecodeStatus::FrameEnd
        } else if status.bytes_written == output.len() {
            DecodeStatus::NeedsOutput
        } else {
            DecodeStatus::NeedsInput
        };
        Ok((status.bytes_read, status.bytes_written, state))
    }
}
