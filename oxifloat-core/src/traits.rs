//! Streaming traits for the entropy stage.
//!
//! The codec feeds its framed stream through a byte-oriented entropy stage
//! and reads it back incrementally on decode. These traits describe that
//! contract: spans in, spans out, with explicit progress reporting so a
//! caller can drive decoding in exact slices of the underlying stream.

use crate::error::Result;

/// Status of a streaming entropy decode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// More input is needed to continue decoding.
    NeedsInput,
    /// More output buffer space is needed.
    NeedsOutput,
    /// The entropy frame is complete; no further output will be produced.
    FrameEnd,
}

/// Status of a streaming entropy encode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStatus {
    /// More input data can be accepted.
    NeedsInput,
    /// More output buffer space is needed.
    NeedsOutput,
    /// Encoding is complete and the frame is fully flushed.
    Done,
}

/// Flush mode for entropy encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flush {
    /// No flush - buffer data for best compression.
    #[default]
    None,
    /// Finish - complete and flush the frame.
    Finish,
}

/// A streaming entropy encoder.
///
/// Implementations are given an input span and append to an output span;
/// the caller finishes the frame by passing [`Flush::Finish`] once all
/// input has been consumed.
pub trait EntropyEncoder {
    /// Encode data from input to output.
    ///
    /// # Arguments
    ///
    /// * `input` - Input bytes to encode
    /// * `output` - Output buffer for encoded bytes
    /// * `flush` - Flush mode
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status).
    fn encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<(usize, usize, EncodeStatus)>;

    /// Encode all data into a finished frame (convenience method).
    fn encode_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut buffer = vec![0u8; 32768];
        let mut input_pos = 0;

        loop {
            let flush = if input_pos >= input.len() {
                Flush::Finish
            } else {
                Flush::None
            };

            let (consumed, produced, status) =
                self.encode(&input[input_pos..], &mut buffer, flush)?;

            input_pos += consumed;
            output.extend_from_slice(&buffer[..produced]);

            match status {
                EncodeStatus::Done => break,
                EncodeStatus::NeedsInput | EncodeStatus::NeedsOutput => continue,
            }
        }

        Ok(output)
    }
}

/// A streaming entropy decoder.
///
/// Given an input span, writes up to the output span's length of decoded
/// bytes. Decoders may buffer internally: a call with an empty input span
/// can still produce output that did not fit on a previous call.
pub trait EntropyDecoder {
    /// Decode data from input to output.
    ///
    /// # Arguments
    ///
    /// * `input` - Input encoded bytes
    /// * `output` - Output buffer for decoded bytes
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status).
    fn decode(&mut self, input: &[u8], output: &mut [u8])
    -> Result<(usize, usize, DecodeStatus)>;
}
