//! SIMD-optimized accumulator row updates.
//!
//! Rows are `i16` slices of the accumulator width. Additions wrap on overflow,
//! matching the two's complement arithmetic of the reference probe, so every
//! path here is bit-identical to the scalar loop.
//!
//! Supports:
//! - `x86_64`: `AVX2` (256-bit vectors, 16 i16 at a time)
//! - aarch64: NEON (128-bit vectors, 8 i16 at a time)
//! - Fallback: Scalar operations
//!
//! The vector paths handle the largest multiple of the lane count and finish
//! the tail with the scalar loop.

// ============================================================================
// Public API - dispatches to platform-specific implementations
// ============================================================================

/// Add `row` to `acc` element-wise (wrapping).
#[inline]
pub fn add_row(acc: &mut [i16], row: &[i16]) {
    assert_eq!(acc.len(), row.len(), "row width mismatch");

    #[cfg(target_arch = "aarch64")]
    {
        // NEON is always available on aarch64
        unsafe { add_row_neon(acc, row) }
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            unsafe { add_row_avx2(acc, row) }
        } else {
            add_row_scalar(acc, row)
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        add_row_scalar(acc, row)
    }
}

/// Subtract `row` from `acc` element-wise (wrapping).
#[inline]
pub fn sub_row(acc: &mut [i16], row: &[i16]) {
    assert_eq!(acc.len(), row.len(), "row width mismatch");

    #[cfg(target_arch = "aarch64")]
    {
        unsafe { sub_row_neon(acc, row) }
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            unsafe { sub_row_avx2(acc, row) }
        } else {
            sub_row_scalar(acc, row)
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        sub_row_scalar(acc, row)
    }
}

// ============================================================================
// Scalar implementations (fallback and vector tails)
// ============================================================================

#[inline]
fn add_row_scalar(acc: &mut [i16], row: &[i16]) {
    for (a, &w) in acc.iter_mut().zip(row) {
        *a = a.wrapping_add(w);
    }
}

#[inline]
fn sub_row_scalar(acc: &mut [i16], row: &[i16]) {
    for (a, &w) in acc.iter_mut().zip(row) {
        *a = a.wrapping_sub(w);
    }
}

// ============================================================================
// NEON implementations (aarch64)
// ============================================================================

#[cfg(target_arch = "aarch64")]
unsafe fn add_row_neon(acc: &mut [i16], row: &[i16]) {
    use std::arch::aarch64::{vaddq_s16, vld1q_s16, vst1q_s16};

    let lanes = acc.len() / 8 * 8;
    let acc_ptr = acc.as_mut_ptr();
    let row_ptr = row.as_ptr();

    for i in (0..lanes).step_by(8) {
        let a = vld1q_s16(acc_ptr.add(i));
        let w = vld1q_s16(row_ptr.add(i));
        vst1q_s16(acc_ptr.add(i), vaddq_s16(a, w));
    }
    add_row_scalar(&mut acc[lanes..], &row[lanes..]);
}

#[cfg(target_arch = "aarch64")]
unsafe fn sub_row_neon(acc: &mut [i16], row: &[i16]) {
    use std::arch::aarch64::{vld1q_s16, vst1q_s16, vsubq_s16};

    let lanes = acc.len() / 8 * 8;
    let acc_ptr = acc.as_mut_ptr();
    let row_ptr = row.as_ptr();

    for i in (0..lanes).step_by(8) {
        let a = vld1q_s16(acc_ptr.add(i));
        let w = vld1q_s16(row_ptr.add(i));
        vst1q_s16(acc_ptr.add(i), vsubq_s16(a, w));
    }
    sub_row_scalar(&mut acc[lanes..], &row[lanes..]);
}

// ============================================================================
// AVX2 implementations (x86_64 only)
// ============================================================================

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn add_row_avx2(acc: &mut [i16], row: &[i16]) {
    use std::arch::x86_64::*;

    let lanes = acc.len() / 16 * 16;
    let acc_ptr = acc.as_mut_ptr();
    let row_ptr = row.as_ptr();

    for i in (0..lanes).step_by(16) {
        let a = _mm256_loadu_si256(acc_ptr.add(i) as *const __m256i);
        let w = _mm256_loadu_si256(row_ptr.add(i) as *const __m256i);
        _mm256_storeu_si256(acc_ptr.add(i) as *mut __m256i, _mm256_add_epi16(a, w));
    }
    add_row_scalar(&mut acc[lanes..], &row[lanes..]);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn sub_row_avx2(acc: &mut [i16], row: &[i16]) {
    use std::arch::x86_64::*;

    let lanes = acc.len() / 16 * 16;
    let acc_ptr = acc.as_mut_ptr();
    let row_ptr = row.as_ptr();

    for i in (0..lanes).step_by(16) {
        let a = _mm256_loadu_si256(acc_ptr.add(i) as *const __m256i);
        let w = _mm256_loadu_si256(row_ptr.add(i) as *const __m256i);
        _mm256_storeu_si256(acc_ptr.add(i) as *mut __m256i, _mm256_sub_epi16(a, w));
    }
    sub_row_scalar(&mut acc[lanes..], &row[lanes..]);
}
