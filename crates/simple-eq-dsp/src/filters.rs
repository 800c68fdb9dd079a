// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad filter processing (direct form I).
//!
//! The coefficient convention is the standard audio cookbook one, with the
//! feedback terms subtracted:
//! ```text
//!   y  = b0*x + b1*x1 + b2*x2 - a1*y1 - a2*y2
//!   x2 = x1;  x1 = x
//!   y2 = y1;  y1 = y
//! ```
//!
//! Direct form I keeps the input and output history separately, so a
//! coefficient swap between blocks never rescales stored state.

use multiversion::multiversion;

use crate::types::Biquad;

/// Run one sample through a biquad and advance its delay memory.
#[inline(always)]
pub fn biquad_tick(f: &mut Biquad, x: f32) -> f32 {
    let c = &f.coeffs;
    let [x1, x2, y1, y2] = f.d;
    let y = c.b0 * x + c.b1 * x1 + c.b2 * x2 - c.a1 * y1 - c.a2 * y2;
    f.d = [x, x1, y, y1];
    y
}

/// Process audio through a single biquad section from `src` into `dst`.
///
/// Output length is `min(dst.len(), src.len())`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn biquad_process_x1(dst: &mut [f32], src: &[f32], f: &mut Biquad) {
    let c = f.coeffs;
    let [mut x1, mut x2, mut y1, mut y2] = f.d;

    for (out, &x) in dst.iter_mut().zip(src.iter()) {
        let y = c.b0 * x + c.b1 * x1 + c.b2 * x2 - c.a1 * y1 - c.a2 * y2;
        x2 = x1;
        x1 = x;
        y2 = y1;
        y1 = y;
        *out = y;
    }

    f.d = [x1, x2, y1, y2];
}

/// Process audio in place through a single biquad section.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn biquad_process_x1_inplace(buf: &mut [f32], f: &mut Biquad) {
    let c = f.coeffs;
    let [mut x1, mut x2, mut y1, mut y2] = f.d;

    for sample in buf.iter_mut() {
        let x = *sample;
        let y = c.b0 * x + c.b1 * x1 + c.b2 * x2 - c.a1 * y1 - c.a2 * y2;
        x2 = x1;
        x1 = x;
        y2 = y1;
        y1 = y;
        *sample = y;
    }

    f.d = [x1, x2, y1, y2];
}
