//! Vector-op interface shared by every SIMD backend.
//!
//! The kernels in [`crate::multiply`] are written once against [`SimdVector`]:
//! broadcast a scalar, load a row chunk, multiply, add, store. Each backend
//! (AVX2, NEON, scalar) implements it on its own register type, and the
//! low-level pointer traits below describe how that register talks to memory.

use std::ops::{Add, Mul};

/// Alignment query for the register type of a backend.
pub trait Alignment<T> {
    /// Returns `true` if `ptr` satisfies the backend's preferred load/store alignment.
    fn is_aligned(ptr: *const T) -> bool;
}

/// Raw loads from memory into a vector register.
pub trait SimdLoad<T> {
    type Output;

    /// Loads a full vector, picking the aligned or unaligned path at runtime.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to at least `size` readable elements,
    /// and `size` must equal the backend lane count.
    unsafe fn load(ptr: *const T, size: usize) -> Self::Output;

    /// Loads a full vector from aligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must satisfy [`Alignment::is_aligned`] and point to a full vector
    /// of readable elements.
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// Loads a full vector from memory with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a full vector of readable elements.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;
}

/// Raw stores from a vector register to memory.
pub trait SimdStore<T> {
    /// Stores the vector, picking the aligned or unaligned path at runtime.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and point to a full vector of writable elements.
    unsafe fn store_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must satisfy [`Alignment::is_aligned`] and point to a full vector
    /// of writable elements.
    unsafe fn store_aligned_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must point to a full vector of writable elements.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);
}

/// Safe, slice-based vector operations used by the matrix kernels.
///
/// Loads and stores always move exactly [`SimdVector::LANES`] values; the
/// slice-based methods panic if the slice is shorter than that.
///
/// # Examples
///
/// ```rust
/// use blockmul::simd::scalar::F32x8;
/// use blockmul::simd::SimdVector;
///
/// let row = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let scaled = F32x8::splat(2.0) * F32x8::load_slice(&row);
///
/// let mut out = [0.0f32; 8];
/// scaled.store_slice(&mut out);
/// assert_eq!(out, [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
/// ```
pub trait SimdVector: Copy + Add<Output = Self> + Mul<Output = Self> {
    /// Number of `f32` lanes held by one vector.
    const LANES: usize;

    /// Short human-readable backend name, used in benchmark reports.
    const NAME: &'static str;

    /// Broadcasts `value` into every lane.
    fn splat(value: f32) -> Self;

    /// Loads the first `LANES` values of `src`.
    fn load_slice(src: &[f32]) -> Self;

    /// Stores all lanes into the first `LANES` slots of `dst`.
    fn store_slice(&self, dst: &mut [f32]);
}
