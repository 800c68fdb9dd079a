// SPDX-License-Identifier: LGPL-3.0-or-later

//! Peaking (bell) biquad coefficients from the RBJ Audio EQ Cookbook.
//!
//! Coefficients are normalised to `a0 = 1` and keep the cookbook signs for
//! `a1`/`a2`, matching the subtracting recurrence in
//! [`simple_eq_dsp::filters`].

use std::f32::consts::PI;

use simple_eq_dsp::types::BiquadX1;

/// Highest design frequency as a fraction of the sample rate.
///
/// Bilinear designs blow up as the frequency approaches Nyquist (0.5), so
/// every frequency handed to the factory is clamped to this ratio first.
pub const NYQUIST_MARGIN: f32 = 0.49;

/// Clamp a design frequency into `(0, NYQUIST_MARGIN * sample_rate]`.
///
/// A 20 kHz high cut at 32 kHz sample rate would otherwise sit above
/// Nyquist.
#[inline]
pub fn clamp_frequency(sample_rate: f32, freq: f32) -> f32 {
    freq.min(sample_rate * NYQUIST_MARGIN)
}

/// Calculate peaking-EQ coefficients.
///
/// # Parameters
///
/// - `sample_rate` -- sample rate in Hz (must be > 0)
/// - `freq` -- center frequency in Hz, below `sample_rate / 2`
/// - `q` -- quality factor / bandwidth (must be > 0)
/// - `linear_gain` -- gain at the center frequency as an amplitude ratio
///   (`10^(gain_db / 20)`)
///
/// A `linear_gain` of exactly 1.0 yields `b == a`, i.e. a transparent filter.
pub fn make_peak_coefficients(sample_rate: f32, freq: f32, q: f32, linear_gain: f32) -> BiquadX1 {
    debug_assert!(sample_rate > 0.0, "sample rate must be positive");
    debug_assert!(
        freq > 0.0 && freq < sample_rate * 0.5,
        "peak frequency {freq} must lie below Nyquist ({})",
        sample_rate * 0.5
    );
    debug_assert!(q > 0.0, "Q must be positive");

    let w0 = 2.0 * PI * freq / sample_rate;
    let cos_w0 = w0.cos();
    let alpha = w0.sin() / (2.0 * q);
    let a = linear_gain.max(0.0).sqrt();

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_w0;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_w0;
    let a2 = 1.0 - alpha / a;

    let inv_a0 = 1.0 / a0;

    BiquadX1 {
        b0: b0 * inv_a0,
        b1: b1 * inv_a0,
        b2: b2 * inv_a0,
        a1: a1 * inv_a0,
        a2: a2 * inv_a0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::section::Section;
    use crate::units::db_to_gain;
    use float_cmp::assert_approx_eq;

    const SR: f32 = 48000.0;

    /// Helper: check that no coefficient is NaN or Inf.
    fn assert_finite(c: &BiquadX1, label: &str) {
        assert!(c.is_finite(), "{label}: non-finite coefficient in {c:?}");
    }

    #[test]
    fn peak_known_values() {
        let c = make_peak_coefficients(SR, 1000.0, 1.0, db_to_gain(6.0));
        assert_finite(&c, "Peak +6dB");

        let w0 = 2.0 * PI * 1000.0 / SR;
        let alpha = w0.sin() / 2.0;
        let a = db_to_gain(6.0).sqrt();
        let a0 = 1.0 + alpha / a;

        let tol = 1e-6;
        assert!((c.b0 - (1.0 + alpha * a) / a0).abs() < tol, "b0 mismatch");
        assert!((c.b1 - (-2.0 * w0.cos()) / a0).abs() < tol, "b1 mismatch");
        assert!((c.b2 - (1.0 - alpha * a) / a0).abs() < tol, "b2 mismatch");
        assert!((c.a1 - (-2.0 * w0.cos()) / a0).abs() < tol, "a1 mismatch");
        assert!((c.a2 - (1.0 - alpha / a) / a0).abs() < tol, "a2 mismatch");
    }

    #[test]
    fn unity_gain_is_transparent() {
        for &(freq, q) in &[(20.0, 0.1), (750.0, 1.0), (5000.0, 10.0), (20000.0, 0.7)] {
            let c = make_peak_coefficients(SR, freq, q, 1.0);
            assert_approx_eq!(f32, c.b0, 1.0, epsilon = 1e-6);
            assert_approx_eq!(f32, c.b1, c.a1, epsilon = 1e-6);
            assert_approx_eq!(f32, c.b2, c.a2, epsilon = 1e-6);
        }
    }

    #[test]
    fn magnitude_at_center_matches_gain() {
        for gain_db in [-24.0f32, -6.0, 3.0, 6.0, 24.0] {
            let mut s = Section::new();
            s.set_coefficients(make_peak_coefficients(SR, 1000.0, 2.0, db_to_gain(gain_db)));
            let mag_db = 20.0 * s.magnitude(1000.0, SR).log10();
            assert!(
                (mag_db - gain_db).abs() < 0.01,
                "peak at center: expected {gain_db} dB, got {mag_db:.3} dB"
            );
        }
    }

    #[test]
    fn boost_and_cut_complementary() {
        // H_boost(z) * H_cut(z) == 1 for equal and opposite gains.
        let boost = make_peak_coefficients(SR, 1000.0, 1.0, db_to_gain(6.0));
        let cut = make_peak_coefficients(SR, 1000.0, 1.0, db_to_gain(-6.0));
        assert_finite(&boost, "Peak +6dB");
        assert_finite(&cut, "Peak -6dB");

        let h_boost_dc = (boost.b0 + boost.b1 + boost.b2) / (1.0 + boost.a1 + boost.a2);
        let h_cut_dc = (cut.b0 + cut.b1 + cut.b2) / (1.0 + cut.a1 + cut.a2);
        assert!(
            (h_boost_dc * h_cut_dc - 1.0).abs() < 1e-4,
            "boost*cut at DC should be 1.0, got {}",
            h_boost_dc * h_cut_dc
        );
    }

    #[test]
    fn full_parameter_range_is_finite() {
        for &sr in &[44100.0f32, 48000.0, 96000.0] {
            for &freq in &[20.0f32, 100.0, 1000.0, 10000.0, 20000.0] {
                for &q in &[0.1f32, 1.0, 10.0] {
                    for &gain_db in &[-24.0f32, 0.0, 24.0] {
                        let f = clamp_frequency(sr, freq);
                        let c = make_peak_coefficients(sr, f, q, db_to_gain(gain_db));
                        assert_finite(&c, &format!("sr={sr} f={freq} q={q} g={gain_db}"));
                    }
                }
            }
        }
    }

    #[test]
    fn clamp_keeps_valid_frequencies() {
        assert_eq!(clamp_frequency(44100.0, 20000.0), 20000.0);
        assert_eq!(clamp_frequency(48000.0, 750.0), 750.0);
    }

    #[test]
    fn clamp_pulls_frequencies_below_nyquist() {
        let f = clamp_frequency(32000.0, 20000.0);
        assert!(f < 16000.0);
        assert_approx_eq!(f32, f, 32000.0 * NYQUIST_MARGIN, ulps = 2);
    }
}
