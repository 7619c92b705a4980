//! AVX2 SIMD implementations for 256-bit vector operations.
//!
//! This module contains the AVX2 backend of the vector-op interface. AVX2 is
//! available on Intel processors since Haswell (2013) and AMD processors since
//! Excavator (2015).
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 256-bit vector containing 8 packed single-precision floating-point values
//!
//! # Conditional Compilation
//!
//! This module is only compiled when `build.rs` emits the `avx2` cfg flag, i.e. when
//! the host CPU (or the enabled target features) support AVX2. Otherwise the crate
//! falls back to NEON or to [`crate::simd::scalar`].

pub mod f32x8;
