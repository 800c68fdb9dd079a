// SPDX-License-Identifier: LGPL-3.0-or-later

//! Per-block parameter snapshot.

use crate::filters::cascade::Slope;
use crate::params::{
    DEFAULT_HIGH_CUT_FREQ, DEFAULT_LOW_CUT_FREQ, DEFAULT_PEAK_FREQ, DEFAULT_PEAK_GAIN_DB,
    DEFAULT_PEAK_Q, ParamId, ParameterSource,
};

/// Every value the filter chain is designed from, read once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// Low cut (high-pass) cutoff in Hz.
    pub low_cut_freq: f32,
    /// High cut (low-pass) cutoff in Hz.
    pub high_cut_freq: f32,
    /// Peak centre frequency in Hz.
    pub peak_freq: f32,
    /// Peak gain in dB.
    pub peak_gain_db: f32,
    /// Peak quality factor.
    pub peak_q: f32,
    pub low_cut_slope: Slope,
    pub high_cut_slope: Slope,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            low_cut_freq: DEFAULT_LOW_CUT_FREQ,
            high_cut_freq: DEFAULT_HIGH_CUT_FREQ,
            peak_freq: DEFAULT_PEAK_FREQ,
            peak_gain_db: DEFAULT_PEAK_GAIN_DB,
            peak_q: DEFAULT_PEAK_Q,
            low_cut_slope: Slope::Slope12,
            high_cut_slope: Slope::Slope12,
        }
    }
}

impl ChainSettings {
    /// Take a snapshot of `source`. Wait-free if `source` is.
    pub fn from_source<S: ParameterSource + ?Sized>(source: &S) -> Self {
        Self {
            low_cut_freq: source.read(ParamId::LowCutFreq),
            high_cut_freq: source.read(ParamId::HighCutFreq),
            peak_freq: source.read(ParamId::PeakFreq),
            peak_gain_db: source.read(ParamId::PeakGain),
            peak_q: source.read(ParamId::PeakQ),
            low_cut_slope: Slope::from_choice(source.read(ParamId::LowCutSlope)),
            high_cut_slope: Slope::from_choice(source.read(ParamId::HighCutSlope)),
        }
    }
}
