// SPDX-License-Identifier: LGPL-3.0-or-later

//! One second-order filter stage with bypass.
//!
//! Wraps a [`Biquad`] from `simple-eq-dsp` with an enabled/bypassed flag and
//! frequency response evaluation.

use std::f32::consts::PI;

use num_complex::Complex32;
use simple_eq_dsp::filters::{biquad_process_x1_inplace, biquad_tick};
use simple_eq_dsp::types::{Biquad, BiquadX1};

/// A single biquad stage of one channel.
///
/// Coefficient updates keep the delay memory: a parameter change causes at
/// most a short transient instead of the click a state reset would produce.
/// While bypassed the stage is the identity and its memory is frozen, so
/// re-enabling it never replays samples that went past it in the meantime.
///
/// # Examples
///
/// ```
/// use simple_eq::filters::coeffs::make_peak_coefficients;
/// use simple_eq::filters::section::Section;
///
/// let mut peak = Section::new();
/// peak.set_coefficients(make_peak_coefficients(48000.0, 1000.0, 1.0, 2.0));
///
/// let mut buf = [1.0, 0.0, 0.0, 0.0];
/// peak.process_inplace(&mut buf);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Section {
    biquad: Biquad,
    bypassed: bool,
}

impl Section {
    /// Create an enabled section with identity coefficients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the coefficient set. The delay memory is preserved.
    pub fn set_coefficients(&mut self, coeffs: BiquadX1) {
        self.biquad.coeffs = coeffs;
    }

    /// Current coefficient set.
    pub fn coefficients(&self) -> &BiquadX1 {
        &self.biquad.coeffs
    }

    /// Bypass (`true`) or enable (`false`) the section.
    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
    }

    /// Returns `true` if the section currently passes audio unchanged.
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Delay memory as `[x1, x2, y1, y2]`.
    pub fn history(&self) -> &[f32; 4] {
        &self.biquad.d
    }

    /// Clear the delay memory. Only called when the stream is (re)prepared.
    pub fn reset(&mut self) {
        self.biquad.reset();
    }

    /// Filter one sample.
    #[inline]
    pub fn process_sample(&mut self, x: f32) -> f32 {
        if self.bypassed {
            return x;
        }
        biquad_tick(&mut self.biquad, x)
    }

    /// Filter a block in place.
    pub fn process_inplace(&mut self, buf: &mut [f32]) {
        if self.bypassed {
            return;
        }
        biquad_process_x1_inplace(buf, &mut self.biquad);
    }

    /// Complex frequency response `H(e^jw)` of the current coefficients.
    ///
    /// Ignores the bypass flag; callers combine stages themselves.
    pub fn response(&self, freq: f32, sample_rate: f32) -> Complex32 {
        let c = &self.biquad.coeffs;
        let w = 2.0 * PI * freq / sample_rate;
        let z1 = Complex32::from_polar(1.0, -w);
        let z2 = z1 * z1;

        let num = z1 * c.b1 + z2 * c.b2 + c.b0;
        let den = z1 * c.a1 + z2 * c.a2 + 1.0;
        num / den
    }

    /// Linear magnitude of the current coefficients at `freq` Hz.
    ///
    /// Returns 1.0 while bypassed.
    pub fn magnitude(&self, freq: f32, sample_rate: f32) -> f32 {
        if self.bypassed {
            return 1.0;
        }
        self.response(freq, sample_rate).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::butterworth::make_lowpass_cascade;
    use crate::filters::coeffs::make_peak_coefficients;
    use float_cmp::assert_approx_eq;

    const SR: f32 = 48000.0;

    fn lowpass() -> BiquadX1 {
        *make_lowpass_cascade(1000.0, SR, 2)
            .get(0)
            .expect("order 2 has one section")
    }

    #[test]
    fn new_section_is_transparent() {
        let mut s = Section::new();
        assert!(!s.is_bypassed());
        let src = [1.0, 0.5, -0.3, 0.8, 0.0];
        let mut buf = src;
        s.process_inplace(&mut buf);
        assert_eq!(buf, src);
    }

    #[test]
    fn process_sample_follows_difference_equation() {
        let c = BiquadX1 {
            b0: 0.5,
            b1: 0.25,
            b2: 0.125,
            a1: -0.5,
            a2: 0.25,
        };
        let mut s = Section::new();
        s.set_coefficients(c);

        let y0 = s.process_sample(1.0);
        assert_approx_eq!(f32, y0, 0.5, ulps = 2);
        assert_eq!(s.history(), &[1.0, 0.0, 0.5, 0.0]);

        // y1 = b0*0 + b1*1 - a1*y0 = 0.25 + 0.25
        let y1 = s.process_sample(0.0);
        assert_approx_eq!(f32, y1, 0.5, ulps = 2);

        // y2 = b2*1 - a1*y1 - a2*y0 = 0.125 + 0.25 - 0.125
        let y2 = s.process_sample(0.0);
        assert_approx_eq!(f32, y2, 0.25, ulps = 2);
        assert_eq!(s.history(), &[0.0, 0.0, y2, y1]);
    }

    #[test]
    fn bypass_is_identity_and_freezes_history() {
        let mut s = Section::new();
        s.set_coefficients(lowpass());

        let mut warmup = [1.0, 0.7, 0.2, -0.4];
        s.process_inplace(&mut warmup);
        let frozen = *s.history();

        s.set_bypassed(true);
        let src = [0.9, -0.9, 0.3, 0.1];
        let mut buf = src;
        s.process_inplace(&mut buf);
        assert_eq!(buf, src);
        assert_eq!(s.process_sample(0.42), 0.42);
        assert_eq!(s.history(), &frozen);
    }

    #[test]
    fn set_coefficients_keeps_history() {
        let mut s = Section::new();
        s.set_coefficients(lowpass());
        let mut buf = [1.0, 0.5, 0.25, 0.125];
        s.process_inplace(&mut buf);
        let before = *s.history();

        s.set_coefficients(make_peak_coefficients(SR, 2000.0, 0.7, 2.0));
        assert_eq!(s.history(), &before);
    }

    #[test]
    fn installing_same_coefficients_twice_is_idempotent() {
        let src: Vec<f32> = (0..256).map(|i| (i as f32 * 0.05).sin()).collect();
        let c = make_peak_coefficients(SR, 3000.0, 2.0, 4.0);

        let mut once = Section::new();
        once.set_coefficients(c);
        let mut out_once = src.clone();
        once.process_inplace(&mut out_once);

        let mut twice = Section::new();
        twice.set_coefficients(c);
        twice.set_coefficients(c);
        let mut out_twice = src.clone();
        twice.process_inplace(&mut out_twice);

        assert_eq!(out_once, out_twice);
    }

    #[test]
    fn reset_clears_state() {
        let mut s = Section::new();
        s.set_coefficients(lowpass());

        let mut buf = [1.0, 0.5, 0.3, 0.1];
        s.process_inplace(&mut buf);

        s.reset();
        let mut ir1 = [1.0, 0.0, 0.0, 0.0];
        s.process_inplace(&mut ir1);

        s.reset();
        let mut ir2 = [1.0, 0.0, 0.0, 0.0];
        s.process_inplace(&mut ir2);

        assert_eq!(ir1, ir2);
        assert_eq!(*s.coefficients(), lowpass());
    }

    #[test]
    fn sample_and_block_paths_agree() {
        let mut a = Section::new();
        let mut b = Section::new();
        a.set_coefficients(lowpass());
        b.set_coefficients(lowpass());

        let src: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin() * 0.8).collect();
        let per_sample: Vec<f32> = src.iter().map(|&x| a.process_sample(x)).collect();
        let mut block = src.clone();
        b.process_inplace(&mut block);

        assert_eq!(per_sample, block);
    }

    #[test]
    fn magnitude_of_lowpass() {
        let mut s = Section::new();
        s.set_coefficients(lowpass());

        assert_approx_eq!(f32, s.magnitude(1.0, SR), 1.0, epsilon = 1e-3);
        assert_approx_eq!(
            f32,
            s.magnitude(1000.0, SR),
            std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-3
        );
        assert!(s.magnitude(SR / 2.0 - 1.0, SR) < 0.01);

        s.set_bypassed(true);
        assert_eq!(s.magnitude(20000.0, SR), 1.0);
    }
}
