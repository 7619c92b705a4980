//! AVX2 8-lane f32 SIMD vector implementation.
//!
//! This module provides `F32x8`, a SIMD vector type that wraps Intel's AVX2 `__m256`
//! intrinsic to perform vectorized operations on 8 single-precision floating-point
//! values simultaneously using 256-bit AVX2 instructions.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel processors with AVX2 support (Haswell and later)
//! - **Target Architecture**: x86_64 (and x86 with SSE compatibility)
//! - **Runtime Detection**: `build.rs` only enables this backend when the host supports it
//! - **Inlining**: the intrinsics only inline into code compiled with AVX2 enabled; the
//!   vectorized multiplier enters through a `#[target_feature(enable = "avx2")]` kernel
//!
//! # Supported Operations
//!
//! ## Loading and Storing
//! - `From<&[f32]>` / [`SimdVector::load_slice`] - checked loading of a full row chunk
//! - `load_aligned()`, `load_unaligned()` - Direct memory loading
//! - `store_at()` - Store with runtime alignment dispatch
//!
//! ## Arithmetic Operators
//! - Element-wise addition (`+`) and multiplication (`*`)

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Mul};

use crate::simd::{Alignment, SimdLoad, SimdStore, SimdVector};

/// AVX2 memory alignment requirement in bytes.
///
/// Block rows of eight `f32` values start on 32-byte boundaries (see
/// [`crate::block::Block`]), so the kernels hit the aligned path of
/// `_mm256_load_ps` and `_mm256_store_ps`.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 values.
///
/// # Memory Alignment
///
/// For optimal performance, data should be aligned to 32-byte boundaries when possible.
/// AVX2 instructions can handle unaligned data but aligned access is faster.
///
/// # Usage
///
/// ```rust,ignore
/// // Only compiled when build.rs selected the AVX2 backend
/// use blockmul::simd::avx2::f32x8::F32x8;
/// use blockmul::simd::SimdVector;
///
/// let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let tripled = F32x8::splat(3.0) * F32x8::from(data.as_slice());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// AVX2 256-bit vector register containing 8 packed f32 values
    pub elements: __m256,
}

impl Alignment<f32> for F32x8 {
    /// Checks if a pointer is aligned to a 32-byte boundary.
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        let ptr = ptr as usize;

        ptr % AVX_ALIGNMENT == 0
    }
}

impl From<&[f32]> for F32x8 {
    /// Creates an F32x8 vector from the first 8 values of a slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 8 elements.
    #[inline(always)]
    fn from(slice: &[f32]) -> Self {
        assert!(
            slice.len() >= LANE_COUNT,
            "slice must hold at least {LANE_COUNT} elements (got {})",
            slice.len()
        );

        unsafe { Self::load(slice.as_ptr(), LANE_COUNT) }
    }
}

impl SimdLoad<f32> for F32x8 {
    type Output = Self;

    /// Loads exactly 8 elements from memory.
    ///
    /// Automatically chooses between aligned and unaligned load based on pointer alignment.
    ///
    /// # Safety
    ///
    /// Pointer must not be null and must point to at least 8 valid f32 values.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if size != 8 or if pointer is null.
    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => unsafe { Self::load_aligned(ptr) },
            false => unsafe { Self::load_unaligned(ptr) },
        }
    }

    /// Loads 8 elements from 32-byte aligned memory using `_mm256_load_ps`.
    ///
    /// # Safety
    ///
    /// Pointer must be 32-byte aligned and point to at least 8 valid f32 values.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    /// Loads 8 elements from unaligned memory using `_mm256_loadu_ps`.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x8 {
    /// Stores all 8 lanes, choosing the aligned store when the pointer allows it.
    ///
    /// # Safety
    ///
    /// Pointer must not be null and must point to 8 writable f32 slots.
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => unsafe { self.store_aligned_at(ptr) },
            false => unsafe { self.store_unaligned_at(ptr) },
        }
    }

    /// Stores 8 elements to 32-byte aligned memory using `_mm256_store_ps`.
    ///
    /// # Safety
    ///
    /// Pointer must be 32-byte aligned and point to 8 writable f32 slots.
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        _mm256_store_ps(ptr, self.elements)
    }

    /// Stores 8 elements to unaligned memory using `_mm256_storeu_ps`.
    ///
    /// # Safety
    ///
    /// Pointer must point to 8 writable f32 slots.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }
}

impl SimdVector for F32x8 {
    const LANES: usize = LANE_COUNT;
    const NAME: &'static str = "avx2 (8 x f32)";

    /// Broadcasts a scalar with `_mm256_set1_ps`.
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_ps(value) },
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

/// Element-wise addition using `_mm256_add_ps`.
impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

/// Element-wise multiplication using `_mm256_mul_ps`.
impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::alloc::{alloc, dealloc, Layout};

    /// Helper function to create aligned memory for testing
    #[inline(always)]
    fn alloc_aligned(size: usize, align: usize) -> *mut f32 {
        let layout = Layout::from_size_align(size * std::mem::size_of::<f32>(), align).unwrap();
        unsafe { alloc(layout) as *mut f32 }
    }

    /// Helper function to deallocate aligned memory for testing
    #[inline(always)]
    fn dealloc_aligned(ptr: *mut f32, size: usize, align: usize) {
        let layout = Layout::from_size_align(size * std::mem::size_of::<f32>(), align).unwrap();
        unsafe { dealloc(ptr as *mut u8, layout) };
    }

    /// Helper function to extract vector elements for comparison in tests
    #[inline(always)]
    fn extract_elements(vec: &F32x8) -> [f32; 8] {
        let mut result = [0.0f32; 8];
        unsafe {
            _mm256_storeu_ps(result.as_mut_ptr(), vec.elements);
        }
        result
    }

    mod alignment_tests {
        use super::*;

        #[test]
        fn test_is_aligned_32_byte_boundary() {
            let aligned_ptr = alloc_aligned(8, 32);
            assert!(F32x8::is_aligned(aligned_ptr));
            dealloc_aligned(aligned_ptr, 8, 32);
        }

        #[test]
        fn test_is_not_aligned() {
            let aligned_ptr = alloc_aligned(16, 32);
            let unaligned_ptr = unsafe { aligned_ptr.add(1) }; // Offset by 1 element (4 bytes)
            assert!(!F32x8::is_aligned(unaligned_ptr));
            dealloc_aligned(aligned_ptr, 16, 32);
        }
    }

    mod simd_load_tests {
        use super::*;

        #[test]
        fn test_from_slice_full() {
            let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
            let vec = F32x8::from(data.as_slice());

            assert_eq!(extract_elements(&vec), data);
        }

        #[test]
        fn test_from_slice_oversized() {
            let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
            let vec = F32x8::from(data.as_slice());

            assert_eq!(
                extract_elements(&vec),
                [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
            );
        }

        #[test]
        #[should_panic(expected = "at least 8 elements")]
        fn test_from_slice_too_short() {
            let data = [1.0, 2.0, 3.0];
            let _ = F32x8::from(data.as_slice());
        }

        #[test]
        fn test_load_aligned() {
            let aligned_ptr = alloc_aligned(8, 32);
            let test_data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

            unsafe {
                std::ptr::copy_nonoverlapping(test_data.as_ptr(), aligned_ptr, 8);
            }

            let vec = unsafe { F32x8::load_aligned(aligned_ptr) };
            assert_eq!(extract_elements(&vec), test_data);

            dealloc_aligned(aligned_ptr, 8, 32);
        }

        #[test]
        fn test_load_unaligned() {
            let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
            let unaligned_ptr = unsafe { data.as_ptr().add(1) }; // Skip first element

            let vec = unsafe { F32x8::load_unaligned(unaligned_ptr) };
            assert_eq!(
                extract_elements(&vec),
                [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
            );
        }
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn test_splat_mul_add_store() {
            let b = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
            let c = [10.0; 8];

            let acc = F32x8::load_slice(&c) + F32x8::splat(3.0) * F32x8::load_slice(&b);

            let mut out = [0.0f32; 8];
            acc.store_slice(&mut out);
            assert_eq!(out, [13.0, 16.0, 19.0, 22.0, 25.0, 28.0, 31.0, 34.0]);
        }

        #[test]
        fn test_store_unaligned_destination() {
            let mut out = [0.0f32; 9];
            F32x8::splat(4.0).store_slice(&mut out[1..]);
            assert_eq!(out[0], 0.0);
            assert!(out[1..].iter().all(|&x| x == 4.0));
        }
    }
}
