//! NEON 4-lane f32 SIMD vector implementation.
//!
//! `F32x4` wraps the AArch64 `float32x4_t` register. An 8-wide block row is
//! processed as two `F32x4` chunks by the vectorized kernel.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, Mul};

use crate::simd::{Alignment, SimdLoad, SimdStore, SimdVector};

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl Alignment<f32> for F32x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % NEON_ALIGNMENT == 0
    }
}

impl From<&[f32]> for F32x4 {
    /// Creates an F32x4 vector from the first 4 values of a slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 4 elements.
    fn from(slice: &[f32]) -> Self {
        assert!(
            slice.len() >= LANE_COUNT,
            "slice must hold at least {LANE_COUNT} elements (got {})",
            slice.len()
        );

        unsafe { Self::load(slice.as_ptr(), LANE_COUNT) }
    }
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    // `vld1q_f32` has no alignment requirement, both paths use it
    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        Self::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: vld1q_f32(ptr),
        }
    }
}

impl SimdStore<f32> for F32x4 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        self.store_unaligned_at(ptr)
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        self.store_unaligned_at(ptr)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        vst1q_f32(ptr, self.elements)
    }
}

impl SimdVector for F32x4 {
    const LANES: usize = LANE_COUNT;
    const NAME: &'static str = "neon (4 x f32)";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { vdupq_n_f32(value) },
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

        unsafe { self.store_at(dst.as_mut_ptr()) }
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}
