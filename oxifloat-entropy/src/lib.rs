//! # OxiFloat Entropy
//!
//! Entropy stage backends for the OxiFloat codec.
//!
//! The codec's framed stream (header, block table, parameter tables, and
//! packed residual words) is byte-oriented and highly repetitive, so it is
//! passed through a general-purpose entropy coder as one logical input.
//! This crate provides the available backends behind the streaming traits
//! of [`oxifloat_core::traits`]:
//!
//! - [`ZstdEncoder`] / [`ZstdDecoder`]: Zstandard streaming contexts
//!   (the default stage)
//! - [`StoredEncoder`] / [`StoredDecoder`]: identity passthrough
//!   (store mode, useful for inspection and as a worst-case baseline)
//!
//! ## Example
//!
//! ```rust
//! use oxifloat_core::traits::{EntropyDecoder, EntropyEncoder};
//! use oxifloat_entropy::{ZstdDecoder, ZstdEncoder};
//!
//! let data = vec![7u8; 4096];
//! let frame = ZstdEncoder::new(1).unwrap().encode_all(&data).unwrap();
//!
//! let mut decoder = ZstdDecoder::new().unwrap();
//! let mut out = vec![0u8; 4096];
//! let mut read = 0;
//! let mut written = 0;
//! while written < out.len() {
//!     let (consumed, produced, _) =
//!         decoder.decode(&frame[read..], &mut out[written..]).unwrap();
//!     read += consumed;
//!     written += produced;
//! }
//! assert_eq!(out, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod stored;
mod zstandard;

pub use stored::{StoredDecoder, StoredEncoder};
pub use zstandard::{ZSTD_MAGIC, ZstdDecoder, ZstdEncoder};
