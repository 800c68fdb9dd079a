// SPDX-License-Identifier: LGPL-3.0-or-later

//! Per-channel filter chain: low cut, then peak, then high cut.

use super::cascade::CutCascade;
use super::section::Section;

/// Stage of a [`ChannelChain`], in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPosition {
    LowCut,
    Peak,
    HighCut,
}

impl ChainPosition {
    /// All stages in processing order.
    pub const ALL: [ChainPosition; 3] = [
        ChainPosition::LowCut,
        ChainPosition::Peak,
        ChainPosition::HighCut,
    ];
}

/// The filters of one audio channel.
///
/// Each channel owns its own chain so the left and right delay memories
/// never mix. Both chains of a stereo pair are always configured with
/// identical coefficients.
#[derive(Debug, Clone, Default)]
pub struct ChannelChain {
    low_cut: CutCascade,
    peak: Section,
    high_cut: CutCascade,
}

impl ChannelChain {
    /// Create a chain with both cut filters bypassed and a transparent peak.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn low_cut(&self) -> &CutCascade {
        &self.low_cut
    }

    pub fn low_cut_mut(&mut self) -> &mut CutCascade {
        &mut self.low_cut
    }

    pub fn peak(&self) -> &Section {
        &self.peak
    }

    pub fn peak_mut(&mut self) -> &mut Section {
        &mut self.peak
    }

    pub fn high_cut(&self) -> &CutCascade {
        &self.high_cut
    }

    pub fn high_cut_mut(&mut self) -> &mut CutCascade {
        &mut self.high_cut
    }

    /// Clear the delay memory of every section in the chain.
    pub fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }

    /// Filter one sample through the whole chain.
    #[inline]
    pub fn process_sample(&mut self, x: f32) -> f32 {
        let x = self.low_cut.process_sample(x);
        let x = self.peak.process_sample(x);
        self.high_cut.process_sample(x)
    }

    /// Filter a block in place through the whole chain.
    pub fn process_inplace(&mut self, buf: &mut [f32]) {
        self.low_cut.process_inplace(buf);
        self.peak.process_inplace(buf);
        self.high_cut.process_inplace(buf);
    }

    /// Linear magnitude of a single stage at `freq` Hz.
    pub fn stage_magnitude(&self, position: ChainPosition, freq: f32, sample_rate: f32) -> f32 {
        match position {
            ChainPosition::LowCut => self.low_cut.magnitude(freq, sample_rate),
            ChainPosition::Peak => self.peak.magnitude(freq, sample_rate),
            ChainPosition::HighCut => self.high_cut.magnitude(freq, sample_rate),
        }
    }

    /// Linear magnitude of the whole chain at `freq` Hz.
    pub fn magnitude(&self, freq: f32, sample_rate: f32) -> f32 {
        ChainPosition::ALL
            .iter()
            .map(|&p| self.stage_magnitude(p, freq, sample_rate))
            .product()
    }
}
