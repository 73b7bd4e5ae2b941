//! # Intermediate Representation (IR)
//!
//! The IR sits between the label composer and the raw device bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐
//! │  Composer   │ ──► │     IR      │ ──► │ Codegen  │
//! │ (encoder)   │     │  (Vec<Op>)  │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Preview   │
//!                     └─────────────┘
//! ```
//!
//! Keeping the job as ops makes it inspectable in tests (count barcodes,
//! sum feed steps) and lets the preview renderer draw the label without
//! parsing bytes back.
//!
//! ## Example
//!
//! ```
//! use osilabel::ir::{FeedDirection, Op, Program};
//!
//! let mut program = Program::new();
//! program.push(Op::Reset);
//! program.push(Op::Text("HELLO\n".into()));
//! program.push(Op::Feed { direction: FeedDirection::Forward, steps: 40 });
//! program.push(Op::Cut);
//!
//! let bytes = program.to_bytes();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;

pub use ops::*;
