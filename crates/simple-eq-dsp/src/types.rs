// SPDX-License-Identifier: LGPL-3.0-or-later

//! Core data types for the biquad primitives.

/// Number of delay (memory) elements in a direct-form-I biquad:
/// `x[n-1]`, `x[n-2]`, `y[n-1]`, `y[n-2]`.
pub const BIQUAD_D_ITEMS: usize = 4;

/// Coefficients for a single biquad filter section, normalised to `a0 = 1`.
///
/// Implements the difference equation:
/// ```text
///   y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// `a1` and `a2` carry the standard cookbook sign; the recurrence subtracts
/// them. The type is `Copy` so a whole coefficient set is replaced in one
/// assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct BiquadX1 {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadX1 {
    /// Identity coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Returns `true` if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }
}

impl Default for BiquadX1 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One biquad section: coefficients plus its delay memory.
///
/// The `d` array is laid out as `[x1, x2, y1, y2]`.
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    /// Delay memory elements.
    pub d: [f32; BIQUAD_D_ITEMS],
    /// Filter coefficients.
    pub coeffs: BiquadX1,
}

impl Biquad {
    /// Create a biquad with the given coefficients and cleared memory.
    pub fn new(coeffs: BiquadX1) -> Self {
        Self {
            d: [0.0; BIQUAD_D_ITEMS],
            coeffs,
        }
    }

    /// Reset the delay memory to zero (clear filter state).
    pub fn reset(&mut self) {
        self.d = [0.0; BIQUAD_D_ITEMS];
    }
}
