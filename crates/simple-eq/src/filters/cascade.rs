// SPDX-License-Identifier: LGPL-3.0-or-later

//! Cut filter: four cascaded sections with a selectable slope.
//!
//! The cascade always owns [`MAX_SECTIONS`] sections, enough for 48
//! dB/octave. A [`Slope`] of N sections enables sections `0..N` and
//! bypasses the rest. The enable pattern is re-applied on every update
//! together with the coefficients it belongs to, so a section is never left
//! enabled with coefficients designed for a different order.

use std::fmt;

use super::butterworth::{CascadeCoeffs, MAX_SECTIONS};
use super::section::Section;
use crate::error::{Error, Result};

/// Roll-off of a cut filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slope {
    /// 12 dB/octave: one section (2nd order).
    #[default]
    Slope12,
    /// 24 dB/octave: two sections (4th order).
    Slope24,
    /// 36 dB/octave: three sections (6th order).
    Slope36,
    /// 48 dB/octave: four sections (8th order).
    Slope48,
}

impl Slope {
    /// All slopes in choice-index order.
    pub const ALL: [Slope; 4] = [Slope::Slope12, Slope::Slope24, Slope::Slope36, Slope::Slope48];

    /// Build a slope from its choice index (0..=3).
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidSlope(index))
    }

    /// Map a raw choice parameter value to a slope.
    ///
    /// The value is rounded to the nearest index and clamped into range;
    /// the parameter store only ever holds valid indices.
    pub fn from_choice(value: f32) -> Self {
        let index = value.round().clamp(0.0, (Self::ALL.len() - 1) as f32) as usize;
        Self::ALL[index]
    }

    /// Choice index (0..=3).
    pub fn index(self) -> usize {
        match self {
            Slope::Slope12 => 0,
            Slope::Slope24 => 1,
            Slope::Slope36 => 2,
            Slope::Slope48 => 3,
        }
    }

    /// Number of active cascade sections (1..=4).
    pub fn sections(self) -> usize {
        self.index() + 1
    }

    /// Butterworth filter order (2, 4, 6 or 8).
    pub fn order(self) -> usize {
        self.sections() * 2
    }

    /// Roll-off in dB per octave.
    pub fn db_per_octave(self) -> u32 {
        self.order() as u32 * 6
    }

    /// Display label as shown by a host ("12 dB/Octave", ...).
    pub fn label(self) -> &'static str {
        match self {
            Slope::Slope12 => "12 dB/Octave",
            Slope::Slope24 => "24 dB/Octave",
            Slope::Slope36 => "36 dB/Octave",
            Slope::Slope48 => "48 dB/Octave",
        }
    }
}

impl TryFrom<usize> for Slope {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four cascaded biquad sections, the first `active` of them enabled.
///
/// # Examples
///
/// ```
/// use simple_eq::filters::butterworth::make_highpass_cascade;
/// use simple_eq::filters::cascade::{CutCascade, Slope};
///
/// let slope = Slope::Slope24;
/// let mut low_cut = CutCascade::new();
/// low_cut.update(&make_highpass_cascade(80.0, 48000.0, slope.order()), slope);
/// assert_eq!(low_cut.active_sections(), 2);
///
/// let mut buf = vec![0.5f32; 64];
/// low_cut.process_inplace(&mut buf);
/// ```
#[derive(Debug, Clone)]
pub struct CutCascade {
    sections: [Section; MAX_SECTIONS],
    active: usize,
}

impl Default for CutCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl CutCascade {
    /// Create a cascade with every section bypassed.
    pub fn new() -> Self {
        Self {
            sections: std::array::from_fn(|_| {
                let mut s = Section::new();
                s.set_bypassed(true);
                s
            }),
            active: 0,
        }
    }

    /// Install coefficients and the matching enable pattern.
    ///
    /// Sections `0..slope.sections()` receive `coeffs[i]` and are enabled;
    /// the remaining sections are bypassed with their memory untouched.
    /// `coeffs` must be designed for `slope.order()`.
    pub fn update(&mut self, coeffs: &CascadeCoeffs, slope: Slope) {
        debug_assert_eq!(
            coeffs.len(),
            slope.sections(),
            "coefficients designed for a different slope"
        );

        let active = slope.sections().min(coeffs.len());
        for (i, section) in self.sections.iter_mut().enumerate() {
            match coeffs.get(i) {
                Some(c) if i < active => {
                    section.set_coefficients(*c);
                    section.set_bypassed(false);
                }
                _ => section.set_bypassed(true),
            }
        }
        self.active = active;
    }

    /// Number of enabled sections.
    pub fn active_sections(&self) -> usize {
        self.active
    }

    /// Section at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_SECTIONS`.
    pub fn section(&self, index: usize) -> &Section {
        &self.sections[index]
    }

    /// Clear the memory of all four sections, enabled or not.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }

    /// Filter one sample through the enabled sections.
    #[inline]
    pub fn process_sample(&mut self, x: f32) -> f32 {
        self.sections[..self.active]
            .iter_mut()
            .fold(x, |acc, section| section.process_sample(acc))
    }

    /// Filter a block in place through the enabled sections.
    pub fn process_inplace(&mut self, buf: &mut [f32]) {
        for section in &mut self.sections[..self.active] {
            section.process_inplace(buf);
        }
    }

    /// Combined linear magnitude of the enabled sections at `freq` Hz.
    pub fn magnitude(&self, freq: f32, sample_rate: f32) -> f32 {
        self.sections
            .iter()
            .map(|s| s.magnitude(freq, sample_rate))
            .product()
    }
}
