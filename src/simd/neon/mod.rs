//! ARM NEON SIMD implementations for 128-bit vector operations.
//!
//! NEON is available on every AArch64 processor, including Apple Silicon and
//! AWS Graviton. Vectors hold 4 × f32, so an 8-wide block row takes two
//! register loads.
//!
//! This module is only compiled when `build.rs` emits the `neon` cfg flag.

pub mod f32x4;
