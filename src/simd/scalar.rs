//! Portable scalar fallback for the vector-op interface.
//!
//! `F32x8` here is a plain `[f32; 8]` with lane-by-lane arithmetic. It is the
//! selected backend when `build.rs` finds neither AVX2 nor NEON, and it is
//! always compiled so kernels and benchmarks can compare against it.

use std::ops::{Add, Mul};

use crate::simd::SimdVector;

pub const LANE_COUNT: usize = 8;

/// Eight `f32` lanes stored in an ordinary array.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct F32x8 {
    pub elements: [f32; LANE_COUNT],
}

impl From<&[f32]> for F32x8 {
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 8 elements.
    fn from(slice: &[f32]) -> Self {
        assert!(
            slice.len() >= LANE_COUNT,
            "slice must hold at least {LANE_COUNT} elements (got {})",
            slice.len()
        );

        let mut elements = [0.0; LANE_COUNT];
        elements.copy_from_slice(&slice[..LANE_COUNT]);
        Self { elements }
    }
}

impl SimdVector for F32x8 {
    const LANES: usize = LANE_COUNT;
    const NAME: &'static str = "scalar (8 x f32)";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    fn load_slice(src: &[f32]) -> Self {
        Self::from(src)
    }

    #[inline(always)]
    fn store_slice(&self, dst: &mut [f32]) {
        assert!(
            dst.len() >= LANE_COUNT,
            "destination must hold at least {LANE_COUNT} elements (got {})",
            dst.len()
        );

        dst[..LANE_COUNT].copy_from_slice(&self.elements);
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        let mut elements = self.elements;
        for (lane, r) in elements.iter_mut().zip(rhs.elements) {
            *lane += r;
        }
        Self { elements }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        let mut elements = self.elements;
        for (lane, r) in elements.iter_mut().zip(rhs.elements) {
            *lane *= r;
        }
        Self { elements }
    }
}
