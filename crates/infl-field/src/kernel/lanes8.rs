//! 8-wide kernel: AVX, with fused multiply-add for the squared distance when
//! the CPU has FMA.  Portable 8-lane body everywhere else.

use infl_core::Precision;

use crate::{Capabilities, UnitSource};

use super::{FieldKernel, portable};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Lanes8Kernel {
    avx:         bool,
    fma:         bool,
    approximate: bool,
}

impl Lanes8Kernel {
    pub fn new(caps: Capabilities, precision: Precision) -> Self {
        Self {
            avx:         caps.avx(),
            fma:         caps.avx() && caps.fma(),
            approximate: precision == Precision::Approximate,
        }
    }

    pub fn path(&self) -> &'static str {
        match (self.avx, self.fma) {
            (true, true)  => "avx+fma",
            (true, false) => "avx",
            _             => "portable",
        }
    }
}

impl FieldKernel for Lanes8Kernel {
    fn name(&self) -> &'static str {
        "lanes8"
    }

    fn lanes(&self) -> usize {
        8
    }

    #[inline]
    fn point<U: UnitSource + ?Sized>(&self, units: &U, x: f32, y: f32) -> f32 {
        #[cfg(target_arch = "x86_64")]
        if self.avx {
            // SAFETY: `avx` and `fma` were copied from a `Capabilities`, which
            // never reports a feature the running CPU lacks.
            return unsafe {
                match (self.fma, self.approximate) {
                    (true, false)  => avx::point_fma::<U, false>(units, x, y),
                    (true, true)   => avx::point_fma::<U, true>(units, x, y),
                    (false, false) => avx::point::<U, false>(units, x, y),
                    (false, true)  => avx::point::<U, true>(units, x, y),
                }
            };
        }
        portable::point::<8, U>(units, x, y)
    }
}

// ── AVX / AVX+FMA ─────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
mod avx {
    use std::arch::x86_64::*;

    use crate::UnitSource;
    use crate::kernel::remainder;

    /// Per-batch term from the squared distance.
    #[inline]
    #[target_feature(enable = "avx")]
    unsafe fn term<const APPROX: bool>(d2: __m256, inf: __m256, one: __m256) -> __m256 {
        unsafe {
            if APPROX {
                // rcp(rsqrt(0)) = rcp(inf) = 0, so a unit on the cell stays finite.
                let dist = _mm256_rcp_ps(_mm256_rsqrt_ps(d2));
                _mm256_mul_ps(inf, _mm256_rcp_ps(_mm256_add_ps(dist, one)))
            } else {
                _mm256_div_ps(inf, _mm256_add_ps(_mm256_sqrt_ps(d2), one))
            }
        }
    }

    #[inline]
    #[target_feature(enable = "avx")]
    unsafe fn hsum(v: __m256) -> f32 {
        unsafe {
            let quad = _mm_add_ps(_mm256_castps256_ps128(v), _mm256_extractf128_ps(v, 1));
            let pair = _mm_add_ps(quad, _mm_movehl_ps(quad, quad));
            let one  = _mm_add_ss(pair, _mm_shuffle_ps(pair, pair, 1));
            _mm_cvtss_f32(one)
        }
    }

    #[target_feature(enable = "avx")]
    pub(super) unsafe fn point<U: UnitSource + ?Sized, const APPROX: bool>(
        units: &U,
        x:     f32,
        y:     f32,
    ) -> f32 {
        let full = units.len() / 8;
        let lanes = unsafe {
            let px  = _mm256_set1_ps(x);
            let py  = _mm256_set1_ps(y);
            let one = _mm256_set1_ps(1.0);
            let mut acc = _mm256_setzero_ps();

            for b in 0..full {
                let batch = units.batch::<8>(b * 8);
                let dx  = _mm256_sub_ps(px, _mm256_loadu_ps(batch.xs.as_ptr()));
                let dy  = _mm256_sub_ps(py, _mm256_loadu_ps(batch.ys.as_ptr()));
                let inf = _mm256_loadu_ps(batch.infs.as_ptr());
                let d2  = _mm256_add_ps(_mm256_mul_ps(dx, dx), _mm256_mul_ps(dy, dy));
                acc = _mm256_add_ps(acc, term::<APPROX>(d2, inf, one));
            }

            hsum(acc)
        };
        lanes + remainder(units, full * 8, x, y)
    }

    #[target_feature(enable = "avx,fma")]
    pub(super) unsafe fn point_fma<U: UnitSource + ?Sized, const APPROX: bool>(
        units: &U,
        x:     f32,
        y:     f32,
    ) -> f32 {
        let full = units.len() / 8;
        let lanes = unsafe {
            let px  = _mm256_set1_ps(x);
            let py  = _mm256_set1_ps(y);
            let one = _mm256_set1_ps(1.0);
            let mut acc = _mm256_setzero_ps();

            for b in 0..full {
                let batch = units.batch::<8>(b * 8);
                let dx  = _mm256_sub_ps(px, _mm256_loadu_ps(batch.xs.as_ptr()));
                let dy  = _mm256_sub_ps(py, _mm256_loadu_ps(batch.ys.as_ptr()));
                let inf = _mm256_loadu_ps(batch.infs.as_ptr());
                let d2  = _mm256_fmadd_ps(dx, dx, _mm256_mul_ps(dy, dy));
                acc = _mm256_add_ps(acc, term::<APPROX>(d2, inf, one));
            }

            hsum(acc)
        };
        lanes + remainder(units, full * 8, x, y)
    }
}
