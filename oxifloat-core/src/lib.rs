//! # OxiFloat Core
//!
//! Core components for the OxiFloat compression library.
//!
//! This crate provides the fundamental building blocks for error-bounded
//! float compression:
//!
//! - [`interleave`]: Bit-slice transpose of quantization groups
//! - [`traits`]: Streaming entropy stage traits
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiFloat is designed as a layered pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Unified API                                         │
//! │     compress/decompress, CLI                            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Stream                                              │
//! │     Global header, block table, entropy stage           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Quantization groups, block layout, word allocation  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Bit slices (this crate)                             │
//! │     32xN bit transpose, entropy stage contract          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxifloat_core::interleave::{deinterleave, interleave};
//!
//! // Transpose 32 residuals of 3 significant bits into 3 bit-slice words.
//! let mut residuals = [0u32; 32];
//! residuals[5] = 0b101;
//! let mut slices = [0u32; 3];
//! interleave(&residuals, 3, &mut slices);
//!
//! // Slice s holds bit s of every residual, one lane per bit position.
//! assert_eq!(slices[0], 1 << 5);
//! assert_eq!(slices[2], 1 << 5);
//! assert_eq!(deinterleave(&slices, 3), residuals);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod interleave;
pub mod traits;
