// SPDX-License-Identifier: LGPL-3.0-or-later

//! Nth-order Butterworth cut filters decomposed into second-order sections.
//!
//! Butterworth filters are maximally flat in the passband. The rolloff slope
//! is 6*N dB/octave where N is the filter order. The low cut of the equalizer
//! is a Butterworth highpass and the high cut a Butterworth lowpass; both use
//! even orders 2/4/6/8 (12..48 dB/octave).
//!
//! An order-N design is split into N/2 biquad sections, plus one first-order
//! section at index 0 when N is odd. Pole placement follows the standard
//! Butterworth formula on the unit circle of the s-plane; each conjugate pair
//! becomes
//!
//! ```text
//!   H(s) = 1 / (s^2 + d_k*s + 1),   d_k = 2*cos(theta_k)
//! ```
//!
//! with `theta_k = (2k+1)*pi/(2N)` for even N and `theta_k = (k+1)*pi/N` for
//! odd N, and is mapped to the z-plane through a pre-warped bilinear
//! transform. Section `k` always holds the same pole pair for a given order,
//! so a cascade that keeps its per-section history from block to block keeps
//! feeding each history through the same pole pair.

use std::f32::consts::PI;

use simple_eq_dsp::types::BiquadX1;

/// Maximum supported filter order.
pub const MAX_ORDER: usize = 8;

/// Maximum number of cascaded sections (ceil(MAX_ORDER / 2)).
pub const MAX_SECTIONS: usize = 4;

/// Butterworth filter type (lowpass or highpass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButterworthType {
    /// Lowpass: passes frequencies below the cutoff (high cut).
    Lowpass,
    /// Highpass: passes frequencies above the cutoff (low cut).
    Highpass,
}

/// Coefficients for up to [`MAX_SECTIONS`] cascaded sections.
///
/// A plain value: building one never allocates, and index `i` always lines
/// up with section `i` of the receiving cascade. Slots past [`len`](Self::len)
/// hold identity coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeCoeffs {
    sections: [BiquadX1; MAX_SECTIONS],
    len: usize,
}

impl CascadeCoeffs {
    /// Number of designed sections.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no section was designed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The designed sections, in cascade order.
    pub fn as_slice(&self) -> &[BiquadX1] {
        &self.sections[..self.len]
    }

    /// Coefficients of section `index`, or `None` past the designed length.
    pub fn get(&self, index: usize) -> Option<&BiquadX1> {
        self.as_slice().get(index)
    }
}

/// Design an `order`-th order Butterworth highpass at `freq` Hz.
///
/// `order` is clamped to `1..=MAX_ORDER`; the equalizer passes 2, 4, 6 or 8.
/// `freq` must lie below `sample_rate / 2`.
pub fn make_highpass_cascade(freq: f32, sample_rate: f32, order: usize) -> CascadeCoeffs {
    design_cascade(ButterworthType::Highpass, freq, sample_rate, order)
}

/// Design an `order`-th order Butterworth lowpass at `freq` Hz.
///
/// `order` is clamped to `1..=MAX_ORDER`; the equalizer passes 2, 4, 6 or 8.
/// `freq` must lie below `sample_rate / 2`.
pub fn make_lowpass_cascade(freq: f32, sample_rate: f32, order: usize) -> CascadeCoeffs {
    design_cascade(ButterworthType::Lowpass, freq, sample_rate, order)
}

/// Design an `order`-th order Butterworth filter of the given type.
pub fn design_cascade(
    filter_type: ButterworthType,
    freq: f32,
    sample_rate: f32,
    order: usize,
) -> CascadeCoeffs {
    debug_assert!((1..=MAX_ORDER).contains(&order), "order {order} out of range");
    debug_assert!(
        freq > 0.0 && freq < sample_rate * 0.5,
        "cutoff {freq} must lie below Nyquist ({})",
        sample_rate * 0.5
    );

    let n = order.clamp(1, MAX_ORDER);

    // Pre-warp the cutoff frequency for bilinear transform
    let wc = (PI * freq / sample_rate).tan();

    let mut out = CascadeCoeffs {
        sections: [BiquadX1::IDENTITY; MAX_SECTIONS],
        len: n.div_ceil(2),
    };

    let mut idx = 0;
    if n % 2 == 1 {
        out.sections[idx] = first_order_section(filter_type, wc);
        idx += 1;
    }

    for k in 0..n / 2 {
        out.sections[idx] = second_order_section(filter_type, wc, section_damping(n, k));
        idx += 1;
    }

    out
}

/// Damping term `d_k = 1/Q_k` of the k-th conjugate pole pair.
fn section_damping(order: usize, k: usize) -> f32 {
    let theta = if order % 2 == 0 {
        PI * (2 * k + 1) as f32 / (2 * order) as f32
    } else {
        PI * (k + 1) as f32 / order as f32
    };
    2.0 * theta.cos()
}

/// First-order section for odd orders: `wc / (s + wc)` or `s / (s + wc)`.
fn first_order_section(filter_type: ButterworthType, wc: f32) -> BiquadX1 {
    let k = 1.0 / (1.0 + wc);
    let a1 = (wc - 1.0) * k;

    let (b0, b1) = match filter_type {
        ButterworthType::Lowpass => (wc * k, wc * k),
        ButterworthType::Highpass => (k, -k),
    };

    BiquadX1 {
        b0,
        b1,
        b2: 0.0,
        a1,
        a2: 0.0,
    }
}

/// Second-order section for one conjugate pole pair with damping `damping`.
fn second_order_section(filter_type: ButterworthType, wc: f32, damping: f32) -> BiquadX1 {
    // Denominator after the bilinear transform:
    //   (1 + d*wc + wc^2) + 2*(wc^2 - 1)*z^-1 + (1 - d*wc + wc^2)*z^-2
    let wc2 = wc * wc;
    let inv_d = 1.0 / (1.0 + damping * wc + wc2);
    let a1 = 2.0 * (wc2 - 1.0) * inv_d;
    let a2 = (1.0 - damping * wc + wc2) * inv_d;

    match filter_type {
        ButterworthType::Lowpass => {
            // Numerator: wc^2 * (1 + 2*z^-1 + z^-2)
            let b0 = wc2 * inv_d;
            BiquadX1 {
                b0,
                b1: 2.0 * b0,
                b2: b0,
                a1,
                a2,
            }
        }
        ButterworthType::Highpass => {
            // Numerator: 1 - 2*z^-1 + z^-2
            BiquadX1 {
                b0: inv_d,
                b1: -2.0 * inv_d,
                b2: inv_d,
                a1,
                a2,
            }
        }
    }
}
