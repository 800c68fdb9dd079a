// SPDX-License-Identifier: LGPL-3.0-or-later

//! Parameter layout and the wait-free parameter store.
//!
//! [`PARAMETER_LAYOUT`] is the static description a host shell registers
//! its knobs from. [`Parameters`] holds the live values: one `AtomicU32`
//! per parameter storing `f32` bits, written by a UI or automation thread
//! through `&self` and read by the audio thread with relaxed loads.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::Error;

/// Lowest frequency of the frequency knobs in Hz.
pub const MIN_FREQ: f32 = 20.0;
/// Highest frequency of the frequency knobs in Hz.
pub const MAX_FREQ: f32 = 20000.0;

/// Default low cut frequency (effectively off).
pub const DEFAULT_LOW_CUT_FREQ: f32 = 20.0;
/// Default high cut frequency (effectively off).
pub const DEFAULT_HIGH_CUT_FREQ: f32 = 20000.0;
/// Default peak centre frequency.
pub const DEFAULT_PEAK_FREQ: f32 = 750.0;
/// Default peak gain in dB.
pub const DEFAULT_PEAK_GAIN_DB: f32 = 0.0;
/// Default peak quality factor.
pub const DEFAULT_PEAK_Q: f32 = 1.0;
/// Default slope choice index (12 dB/Octave).
pub const DEFAULT_SLOPE_INDEX: f32 = 0.0;

/// Labels of the slope choice parameters, by index.
pub const SLOPE_LABELS: [&str; 4] = ["12 dB/Octave", "24 dB/Octave", "36 dB/Octave", "48 dB/Octave"];

/// Identifier of an automatable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    LowCutFreq,
    LowCutSlope,
    HighCutFreq,
    HighCutSlope,
    PeakFreq,
    PeakGain,
    PeakQ,
}

impl ParamId {
    /// Number of parameters.
    pub const COUNT: usize = 7;

    /// All parameters in layout order.
    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::LowCutFreq,
        ParamId::LowCutSlope,
        ParamId::HighCutFreq,
        ParamId::HighCutSlope,
        ParamId::PeakFreq,
        ParamId::PeakGain,
        ParamId::PeakQ,
    ];

    /// Position in [`PARAMETER_LAYOUT`] and in the store.
    pub const fn index(self) -> usize {
        match self {
            ParamId::LowCutFreq => 0,
            ParamId::LowCutSlope => 1,
            ParamId::HighCutFreq => 2,
            ParamId::HighCutSlope => 3,
            ParamId::PeakFreq => 4,
            ParamId::PeakGain => 5,
            ParamId::PeakQ => 6,
        }
    }

    /// Stable string identifier used by hosts and saved state.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamId::LowCutFreq => "LowCut Freq",
            ParamId::LowCutSlope => "LowCut Slope",
            ParamId::HighCutFreq => "HighCut Freq",
            ParamId::HighCutSlope => "HighCut Slope",
            ParamId::PeakFreq => "Peak Freq",
            ParamId::PeakGain => "Peak Gain",
            ParamId::PeakQ => "Peak Q",
        }
    }

    /// Layout entry for this parameter.
    pub fn spec(self) -> &'static ParamSpec {
        &PARAMETER_LAYOUT[self.index()]
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownParameter(s.to_owned()))
    }
}

/// How a parameter is presented to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Continuous value in `min..=max`, quantised to `step`.
    Float,
    /// Discrete choice; the value is an index into `labels`.
    Choice { labels: &'static [&'static str] },
}

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
    pub kind: ParamKind,
}

impl ParamSpec {
    const fn float(id: ParamId, min: f32, max: f32, step: f32, default: f32) -> Self {
        Self {
            id,
            name: id.as_str(),
            min,
            max,
            step,
            default,
            kind: ParamKind::Float,
        }
    }

    const fn choice(id: ParamId, labels: &'static [&'static str], default: f32) -> Self {
        Self {
            id,
            name: id.as_str(),
            min: 0.0,
            max: (labels.len() - 1) as f32,
            step: 1.0,
            default,
            kind: ParamKind::Choice { labels },
        }
    }

    /// Clamp `value` into range and snap it to the step grid.
    ///
    /// The grid is anchored at `min`. Non-finite input yields the default.
    pub fn quantize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        // Steps are 1/n of a unit; dividing by n keeps 6.0 dB exactly 6.0.
        let divisions = (1.0 / self.step as f64).round().max(1.0);
        let min = self.min as f64;
        let steps = ((clamped as f64 - min) * divisions).round();
        ((min + steps / divisions) as f32).clamp(self.min, self.max)
    }

    /// Returns `true` if `value` lies inside `min..=max`.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Every parameter the equalizer exposes, in [`ParamId::index`] order.
pub const PARAMETER_LAYOUT: [ParamSpec; ParamId::COUNT] = [
    ParamSpec::float(ParamId::LowCutFreq, MIN_FREQ, MAX_FREQ, 1.0, DEFAULT_LOW_CUT_FREQ),
    ParamSpec::choice(ParamId::LowCutSlope, &SLOPE_LABELS, DEFAULT_SLOPE_INDEX),
    ParamSpec::float(ParamId::HighCutFreq, MIN_FREQ, MAX_FREQ, 1.0, DEFAULT_HIGH_CUT_FREQ),
    ParamSpec::choice(ParamId::HighCutSlope, &SLOPE_LABELS, DEFAULT_SLOPE_INDEX),
    ParamSpec::float(ParamId::PeakFreq, MIN_FREQ, MAX_FREQ, 1.0, DEFAULT_PEAK_FREQ),
    ParamSpec::float(ParamId::PeakGain, -24.0, 24.0, 0.05, DEFAULT_PEAK_GAIN_DB),
    ParamSpec::float(ParamId::PeakQ, 0.1, 10.0, 0.05, DEFAULT_PEAK_Q),
];

/// Something the processor can read parameter values from.
///
/// `read` is called on the audio thread once per parameter per block and
/// must be wait-free.
pub trait ParameterSource {
    fn read(&self, id: ParamId) -> f32;
}

/// Lock-free parameter store.
///
/// Share it between the audio thread and the control side with an
/// [`Arc`](std::sync::Arc):
///
/// ```
/// use std::sync::Arc;
/// use simple_eq::params::{ParamId, ParameterSource, Parameters};
///
/// let params = Arc::new(Parameters::default());
/// params.set(ParamId::PeakGain, 6.0);
/// assert_eq!(params.read(ParamId::PeakGain), 6.0);
/// ```
#[derive(Debug)]
pub struct Parameters {
    values: [AtomicU32; ParamId::COUNT],
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|i| AtomicU32::new(PARAMETER_LAYOUT[i].default.to_bits())),
        }
    }
}

impl Parameters {
    /// Create a store holding every parameter's default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `id`.
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Relaxed))
    }

    /// Store a new value and return what was actually stored.
    ///
    /// The value is clamped to the parameter range and snapped to its step.
    pub fn set(&self, id: ParamId, value: f32) -> f32 {
        let spec = id.spec();
        let stored = spec.quantize(value);
        if !spec.contains(value) {
            log::warn!(
                "{id}: value {value} outside {}..={}, stored {stored}",
                spec.min,
                spec.max
            );
        }
        self.values[id.index()].store(stored.to_bits(), Ordering::Relaxed);
        stored
    }

    /// Like [`set`](Self::set), addressing the parameter by its string id.
    pub fn set_by_name(&self, id: &str, value: f32) -> crate::Result<f32> {
        let id: ParamId = id.parse()?;
        Ok(self.set(id, value))
    }

    /// Restore every parameter to its default.
    pub fn reset(&self) {
        for spec in &PARAMETER_LAYOUT {
            self.values[spec.id.index()].store(spec.default.to_bits(), Ordering::Relaxed);
        }
    }
}

impl ParameterSource for Parameters {
    #[inline]
    fn read(&self, id: ParamId) -> f32 {
        self.get(id)
    }
}
