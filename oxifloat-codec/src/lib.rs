//! # OxiFloat Codec
//!
//! Error-bounded compression for dense `f32` arrays.
//!
//! A user-chosen quantization step `epsilon` bounds the reconstruction
//! error per element; everything after quantization is bit-exact
//! reversible. The pipeline:
//!
//! ```text
//! f32 values
//!   │ quantize (round half to even, step epsilon)
//!   │ first-order delta + zigzag            per worker of 128 values
//!   ▼
//! u32 residuals
//!   │ per group of 32: exception extraction,
//!   │ bit-width selection, bit-slice transpose
//!   ▼
//! parameter tables + packed words           per block of 32768 values
//!   │ global header + block table
//!   ▼
//! framed stream ──► entropy stage (Zstandard) ──► byte stream
//! ```
//!
//! Each group of 32 residuals stores its single largest residual (the
//! *exception*) out of band, so the remaining 31 share the bit width of the
//! second-largest value. Groups are packed back to back with no padding;
//! per-worker word offsets are an exclusive prefix sum over the group bit
//! widths, which lets decode reproduce the layout from the parameter table
//! alone.
//!
//! ## Example
//!
//! ```rust
//! use oxifloat_codec::{compress, decompress};
//!
//! let data: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.1).sin()).collect();
//! let bytes = compress(&data, 1e-4).unwrap();
//! let restored = decompress(&bytes).unwrap();
//!
//! assert_eq!(restored.len(), data.len());
//! for (a, b) in data.iter().zip(&restored) {
//!     assert!((a - b).abs() <= 1e-4);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod group;
pub mod stream;

pub use group::GroupParams;
pub use stream::{EpsilonEncoder, StreamInfo, compress, decompress, stream_info};

/// Values per quantization group; matches the packing word width.
pub const QUANT_GROUP: usize = 32;

/// Groups processed sequentially by one worker (one delta chain).
pub const GROUPS_PER_WORKER: usize = 4;

/// Workers cooperating on one block.
pub const WORKERS_PER_BLOCK: usize = 256;

/// Values covered by one worker.
pub const FLOATS_PER_WORKER: usize = GROUPS_PER_WORKER * QUANT_GROUP;

/// Values covered by one block.
pub const FLOATS_PER_BLOCK: usize = WORKERS_PER_BLOCK * FLOATS_PER_WORKER;

/// Group parameter triples per block.
pub const PARAMS_PER_BLOCK: usize = WORKERS_PER_BLOCK * GROUPS_PER_WORKER;

/// Serialized bytes per parameter triple (max_index, bits, high).
pub const PARAM_BYTES: usize = 6;

/// Stream identifier at the head of the framed stream.
pub const MAGIC: u32 = 0xCA7D_D007;

/// Compression level handed to the entropy stage.
pub const ENTROPY_LEVEL: i32 = 1;
