//! CPU capability probe.
//!
//! Detection runs once, when the engine is built.  The result decides which
//! [`Kernel`][crate::Kernel] is selected and is carried inside the kernel, so
//! nothing branches on CPU features per cell.
//!
//! Fields are private: a `Capabilities` value can only come from
//! [`detect`](Capabilities::detect) or [`portable`](Capabilities::portable)
//! and can only be narrowed afterwards.  The AVX and FMA paths rely on this to
//! never claim a feature the running CPU lacks.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Capabilities {
    avx:     bool,
    fma:     bool,
    simd128: bool,
}

impl Capabilities {
    /// Probe the running CPU.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            let avx = is_x86_feature_detected!("avx");
            let fma = avx && is_x86_feature_detected!("fma");
            // SSE2 is part of the x86_64 baseline.
            Self { avx, fma, simd128: true }
        }

        #[cfg(target_arch = "aarch64")]
        {
            let simd128 = std::arch::is_aarch64_feature_detected!("neon");
            Self { avx: false, fma: false, simd128 }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::portable()
        }
    }

    /// No hardware vector support.  Every kernel falls back to its portable
    /// form.
    pub const fn portable() -> Self {
        Self { avx: false, fma: false, simd128: false }
    }

    /// Same capabilities with AVX (and therefore FMA) masked off.
    pub const fn without_avx(self) -> Self {
        Self { avx: false, fma: false, ..self }
    }

    /// Same capabilities with FMA masked off.
    pub const fn without_fma(self) -> Self {
        Self { fma: false, ..self }
    }

    #[inline]
    pub fn avx(&self) -> bool {
        self.avx
    }

    #[inline]
    pub fn fma(&self) -> bool {
        self.fma
    }

    /// 128-bit vectors: SSE2 on x86_64, NEON on aarch64.
    #[inline]
    pub fn simd128(&self) -> bool {
        self.simd128
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.simd128 {
            parts.push(if cfg!(target_arch = "aarch64") { "neon" } else { "sse2" });
        }
        if self.avx {
            parts.push("avx");
        }
        if self.fma {
            parts.push("fma");
        }
        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join("+"))
        }
    }
}
