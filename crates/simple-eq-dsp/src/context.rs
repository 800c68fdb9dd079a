// SPDX-License-Identifier: LGPL-3.0-or-later

//! Scoped control of the floating-point denormal mode.
//!
//! Recursive filters decaying toward silence produce denormal floats, which
//! run 10-100x slower on most CPUs. [`DenormalGuard`] switches the current
//! thread to flush-to-zero (FTZ) and denormals-are-zero (DAZ) for as long as
//! it lives, then restores the previous control state.
//!
//! # Platform support
//!
//! - **x86/x86_64**: sets FTZ and DAZ bits in the MXCSR register.
//! - **aarch64**: sets the FZ bit in the FPCR register.
//! - **Other**: no-op.

/// FTZ bit in x86 MXCSR register.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const MXCSR_FTZ: u32 = 0x8000;

/// DAZ bit in x86 MXCSR register.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const MXCSR_DAZ: u32 = 0x0040;

/// FZ bit in aarch64 FPCR register.
#[cfg(target_arch = "aarch64")]
const FPCR_FZ: u64 = 1 << 24;

/// RAII guard that flushes denormals to zero on the current thread.
///
/// # Examples
/// ```
/// use simple_eq_dsp::context::DenormalGuard;
///
/// {
///     let _guard = DenormalGuard::new();
///     // ... DSP processing with denormals flushed to zero ...
/// }
/// // previous floating-point mode restored here
/// ```
#[derive(Debug)]
#[must_use = "the denormal mode is restored as soon as the guard is dropped"]
pub struct DenormalGuard {
    saved: u64,
}

impl DenormalGuard {
    /// Enable flush-to-zero, saving the current control state.
    pub fn new() -> Self {
        Self {
            saved: enable_ftz(),
        }
    }
}

impl Default for DenormalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DenormalGuard {
    fn drop(&mut self) {
        restore(self.saved);
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(deprecated)]
fn enable_ftz() -> u64 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{_mm_getcsr, _mm_setcsr};
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{_mm_getcsr, _mm_setcsr};

    // SAFETY: reading and writing MXCSR only changes the rounding/denormal
    // mode of the current thread.
    unsafe {
        let csr = _mm_getcsr();
        _mm_setcsr(csr | MXCSR_FTZ | MXCSR_DAZ);
        csr as u64
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(deprecated)]
fn restore(saved: u64) {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::_mm_setcsr;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::_mm_setcsr;

    // SAFETY: restores a value previously read from MXCSR.
    unsafe {
        _mm_setcsr(saved as u32);
    }
}

#[cfg(target_arch = "aarch64")]
fn enable_ftz() -> u64 {
    let fpcr: u64;
    // SAFETY: FPCR only controls floating-point behaviour of this thread.
    unsafe {
        core::arch::asm!("mrs {}, fpcr", out(reg) fpcr);
        core::arch::asm!("msr fpcr, {}", in(reg) fpcr | FPCR_FZ);
    }
    fpcr
}

#[cfg(target_arch = "aarch64")]
fn restore(saved: u64) {
    // SAFETY: restores a value previously read from FPCR.
    unsafe {
        core::arch::asm!("msr fpcr, {}", in(reg) saved);
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn enable_ftz() -> u64 {
    0
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn restore(_saved: u64) {}
