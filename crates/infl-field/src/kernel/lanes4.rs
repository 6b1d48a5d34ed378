//! 4-wide kernel: SSE on x86_64, NEON on aarch64.

use infl_core::Precision;

use crate::{Capabilities, UnitSource};

use super::{FieldKernel, portable};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Lanes4Kernel {
    simd:        bool,
    approximate: bool,
}

impl Lanes4Kernel {
    pub fn new(caps: Capabilities, precision: Precision) -> Self {
        Self {
            simd:        caps.simd128(),
            approximate: precision == Precision::Approximate,
        }
    }

    pub fn path(&self) -> &'static str {
        if !self.simd {
            "portable"
        } else if cfg!(target_arch = "x86_64") {
            "sse"
        } else if cfg!(target_arch = "aarch64") {
            "neon"
        } else {
            "portable"
        }
    }
}

impl FieldKernel for Lanes4Kernel {
    fn name(&self) -> &'static str {
        "lanes4"
    }

    fn lanes(&self) -> usize {
        4
    }

    #[inline]
    fn point<U: UnitSource + ?Sized>(&self, units: &U, x: f32, y: f32) -> f32 {
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        if self.simd {
            return if self.approximate {
                simd::point::<U, true>(units, x, y)
            } else {
                simd::point::<U, false>(units, x, y)
            };
        }
        portable::point::<4, U>(units, x, y)
    }
}

// ── SSE ───────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
mod simd {
    use std::arch::x86_64::*;

    use crate::UnitSource;
    use crate::kernel::remainder;

    #[inline(always)]
    pub(super) fn point<U: UnitSource + ?Sized, const APPROX: bool>(
        units: &U,
        x:     f32,
        y:     f32,
    ) -> f32 {
        let full = units.len() / 4;

        // SAFETY: SSE and SSE2 are part of the x86_64 baseline, and every load
        // reads a whole 4-element lane array.
        let lanes = unsafe {
            let px  = _mm_set1_ps(x);
            let py  = _mm_set1_ps(y);
            let one = _mm_set1_ps(1.0);
            let mut acc = _mm_setzero_ps();

            for b in 0..full {
                let batch = units.batch::<4>(b * 4);
                let dx  = _mm_sub_ps(px, _mm_loadu_ps(batch.xs.as_ptr()));
                let dy  = _mm_sub_ps(py, _mm_loadu_ps(batch.ys.as_ptr()));
                let inf = _mm_loadu_ps(batch.infs.as_ptr());
                let d2  = _mm_add_ps(_mm_mul_ps(dx, dx), _mm_mul_ps(dy, dy));

                let term = if APPROX {
                    // rcp(rsqrt(0)) = rcp(inf) = 0, so a unit on the cell stays finite.
                    let dist = _mm_rcp_ps(_mm_rsqrt_ps(d2));
                    _mm_mul_ps(inf, _mm_rcp_ps(_mm_add_ps(dist, one)))
                } else {
                    _mm_div_ps(inf, _mm_add_ps(_mm_sqrt_ps(d2), one))
                };
                acc = _mm_add_ps(acc, term);
            }

            hsum(acc)
        };

        lanes + remainder(units, full * 4, x, y)
    }

    #[inline(always)]
    unsafe fn hsum(v: __m128) -> f32 {
        unsafe {
            let pair = _mm_add_ps(v, _mm_movehl_ps(v, v));
            let one  = _mm_add_ss(pair, _mm_shuffle_ps(pair, pair, 1));
            _mm_cvtss_f32(one)
        }
    }
}

// ── NEON ──────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "aarch64")]
mod simd {
    use std::arch::aarch64::*;

    use crate::UnitSource;
    use crate::kernel::remainder;

    #[inline(always)]
    pub(super) fn point<U: UnitSource + ?Sized, const APPROX: bool>(
        units: &U,
        x:     f32,
        y:     f32,
    ) -> f32 {
        let full = units.len() / 4;

        // SAFETY: NEON is part of the aarch64 baseline, and every load reads a
        // whole 4-element lane array.
        let lanes = unsafe {
            let px  = vdupq_n_f32(x);
            let py  = vdupq_n_f32(y);
            let one = vdupq_n_f32(1.0);
            let mut acc = vdupq_n_f32(0.0);

            for b in 0..full {
                let batch = units.batch::<4>(b * 4);
                let dx  = vsubq_f32(px, vld1q_f32(batch.xs.as_ptr()));
                let dy  = vsubq_f32(py, vld1q_f32(batch.ys.as_ptr()));
                let inf = vld1q_f32(batch.infs.as_ptr());
                let d2  = vfmaq_f32(vmulq_f32(dy, dy), dx, dx);
                let den = vaddq_f32(vsqrtq_f32(d2), one);

                let term = if APPROX {
                    // The bare NEON estimate is ~8 bits; one Newton-Raphson step.
                    let r = vrecpeq_f32(den);
                    let r = vmulq_f32(r, vrecpsq_f32(den, r));
                    vmulq_f32(inf, r)
                } else {
                    vdivq_f32(inf, den)
                };
                acc = vaddq_f32(acc, term);
            }

            vaddvq_f32(acc)
        };

        lanes + remainder(units, full * 4, x, y)
    }
}
