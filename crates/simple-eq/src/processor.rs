// SPDX-License-Identifier: LGPL-3.0-or-later

//! Stereo three-band equalizer: low cut, peak and high cut per channel.
//!
//! Every block the processor snapshots its [`ParameterSource`], redesigns
//! all filter coefficients, installs them into both channel chains and then
//! filters the left and right buffers in place. Coefficient updates never
//! touch the delay memory; only [`EqProcessor::prepare`] and
//! [`EqProcessor::release`] clear it.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use simple_eq::params::{ParamId, Parameters};
//! use simple_eq::processor::EqProcessor;
//!
//! let params = Arc::new(Parameters::default());
//! let mut eq = EqProcessor::with_source(Arc::clone(&params));
//! eq.prepare(48000.0, 512).unwrap();
//!
//! // Control side, any thread.
//! params.set(ParamId::PeakGain, 6.0);
//! params.set(ParamId::LowCutFreq, 80.0);
//!
//! // Audio side.
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! eq.process(&mut left, &mut right);
//! ```

use std::sync::Arc;

use simple_eq_dsp::context::DenormalGuard;

use crate::error::{Error, Result};
use crate::filters::butterworth::{make_highpass_cascade, make_lowpass_cascade};
use crate::filters::chain::ChannelChain;
use crate::filters::coeffs::{clamp_frequency, make_peak_coefficients};
use crate::params::{ParameterSource, Parameters};
use crate::settings::ChainSettings;
use crate::units::{db_to_gain, gain_to_db};

/// Floor of [`EqProcessor::magnitude_response`] in dB.
pub const MIN_RESPONSE_DB: f32 = -100.0;

/// Two identically configured channel chains driven by a parameter source.
#[derive(Debug)]
pub struct EqProcessor<S: ParameterSource = Parameters> {
    params: Arc<S>,
    left: ChannelChain,
    right: ChannelChain,
    sample_rate: f32,
    max_block_size: usize,
    prepared: bool,
}

impl EqProcessor<Parameters> {
    /// Create a processor with its own default parameter store.
    pub fn new() -> Self {
        Self::with_source(Arc::new(Parameters::default()))
    }
}

impl Default for EqProcessor<Parameters> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ParameterSource> EqProcessor<S> {
    /// Create an unprepared processor reading from `params`.
    pub fn with_source(params: Arc<S>) -> Self {
        Self {
            params,
            left: ChannelChain::new(),
            right: ChannelChain::new(),
            sample_rate: 0.0,
            max_block_size: 0,
            prepared: false,
        }
    }

    /// The shared parameter source.
    pub fn parameters(&self) -> &Arc<S> {
        &self.params
    }

    /// Sample rate of the last successful [`prepare`](Self::prepare), or 0.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn left(&self) -> &ChannelChain {
        &self.left
    }

    pub fn right(&self) -> &ChannelChain {
        &self.right
    }

    /// Start (or restart) a stream.
    ///
    /// Clears all filter memory and installs coefficients for the current
    /// parameter values. On error the processor is left unchanged.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }

        log::debug!("prepare: sample_rate={sample_rate} max_block_size={max_block_size}");

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.left.reset();
        self.right.reset();

        let settings = ChainSettings::from_source(self.params.as_ref());
        self.update_filters(&settings);
        self.prepared = true;
        Ok(())
    }

    /// Stop the stream: clear filter memory and mark the processor unprepared.
    pub fn release(&mut self) {
        log::debug!("release");
        self.left.reset();
        self.right.reset();
        self.prepared = false;
    }

    /// Filter one stereo block in place.
    ///
    /// Reads a fresh parameter snapshot, redesigns every filter and runs
    /// each buffer through its own chain. Does not allocate, lock or log.
    ///
    /// # Panics
    ///
    /// Panics if called before [`prepare`](Self::prepare) or after
    /// [`release`](Self::release).
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        let settings = ChainSettings::from_source(self.params.as_ref());
        self.process_with_settings(&settings, left, right);
    }

    /// Filter one stereo block in place using explicit `settings` instead
    /// of the parameter source.
    ///
    /// # Panics
    ///
    /// Panics if the processor is not prepared.
    pub fn process_with_settings(
        &mut self,
        settings: &ChainSettings,
        left: &mut [f32],
        right: &mut [f32],
    ) {
        assert!(self.prepared, "process called on an unprepared EqProcessor");
        debug_assert_eq!(left.len(), right.len(), "channel buffers differ in length");
        debug_assert!(
            left.len() <= self.max_block_size,
            "block of {} samples exceeds prepared maximum {}",
            left.len(),
            self.max_block_size
        );

        let _guard = DenormalGuard::new();

        self.update_filters(settings);
        self.left.process_inplace(left);
        self.right.process_inplace(right);
    }

    /// Redesign all filters from `settings` and install them in both chains.
    pub fn update_filters(&mut self, settings: &ChainSettings) {
        self.update_peak(settings);
        self.update_low_cut(settings);
        self.update_high_cut(settings);
    }

    fn update_peak(&mut self, settings: &ChainSettings) {
        let coeffs = make_peak_coefficients(
            self.sample_rate,
            clamp_frequency(self.sample_rate, settings.peak_freq),
            settings.peak_q,
            db_to_gain(settings.peak_gain_db),
        );
        self.left.peak_mut().set_coefficients(coeffs);
        self.right.peak_mut().set_coefficients(coeffs);
    }

    fn update_low_cut(&mut self, settings: &ChainSettings) {
        let slope = settings.low_cut_slope;
        let coeffs = make_highpass_cascade(
            clamp_frequency(self.sample_rate, settings.low_cut_freq),
            self.sample_rate,
            slope.order(),
        );
        self.left.low_cut_mut().update(&coeffs, slope);
        self.right.low_cut_mut().update(&coeffs, slope);
    }

    fn update_high_cut(&mut self, settings: &ChainSettings) {
        let slope = settings.high_cut_slope;
        let coeffs = make_lowpass_cascade(
            clamp_frequency(self.sample_rate, settings.high_cut_freq),
            self.sample_rate,
            slope.order(),
        );
        self.left.high_cut_mut().update(&coeffs, slope);
        self.right.high_cut_mut().update(&coeffs, slope);
    }

    /// Evaluate the magnitude response of the installed filters.
    ///
    /// Writes `20·log10|H(f)|` for each frequency in `freqs` to `out_db`,
    /// floored at [`MIN_RESPONSE_DB`]. Both chains are identical, so the
    /// left one is evaluated. Before the first `prepare` every entry is 0.
    pub fn magnitude_response(&self, freqs: &[f32], out_db: &mut [f32]) {
        debug_assert_eq!(freqs.len(), out_db.len());
        if self.sample_rate <= 0.0 {
            out_db.fill(0.0);
            return;
        }
        for (out, &freq) in out_db.iter_mut().zip(freqs) {
            let mag = self.left.magnitude(freq, self.sample_rate);
            *out = gain_to_db(mag).max(MIN_RESPONSE_DB);
        }
    }
}
