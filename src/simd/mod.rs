//! SIMD backends and the vector-op interface used by the vectorized kernel.
//!
//! Exactly one backend is selected at compile time by `build.rs` and exported
//! as [`NativeF32`]:
//!
//! | cfg flag   | type                 | lanes |
//! |------------|----------------------|-------|
//! | `avx2`     | [`avx2::f32x8::F32x8`] | 8   |
//! | `neon`     | [`neon::f32x4::F32x4`] | 4   |
//! | `fallback` | [`scalar::F32x8`]      | 8   |

#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx2;

#[cfg(all(neon, target_arch = "aarch64"))]
pub mod neon;

pub mod scalar;

pub mod traits;

pub use traits::{Alignment, SimdLoad, SimdStore, SimdVector};

/// The vector type picked for this build.
#[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
pub type NativeF32 = avx2::f32x8::F32x8;

/// The vector type picked for this build.
#[cfg(all(neon, target_arch = "aarch64"))]
pub type NativeF32 = neon::f32x4::F32x4;

/// The vector type picked for this build.
#[cfg(not(any(
    all(avx2, any(target_arch = "x86", target_arch = "x86_64")),
    all(neon, target_arch = "aarch64")
)))]
pub type NativeF32 = scalar::F32x8;

/// Lane width of [`NativeF32`]. Block sizes must be a multiple of it.
pub const LANE_COUNT: usize = <NativeF32 as SimdVector>::LANES;

/// Name of the backend selected for this build, e.g. `"avx2 (8 x f32)"`.
pub fn backend_name() -> &'static str {
    <NativeF32 as SimdVector>::NAME
}
