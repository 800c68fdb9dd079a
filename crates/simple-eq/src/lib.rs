// SPDX-License-Identifier: LGPL-3.0-or-later

//! # simple-eq
//!
//! Real-time core of a three-band stereo parametric equalizer.
//!
//! Each channel runs a fixed chain of biquad sections:
//!
//! - **Low cut**: Butterworth high-pass, 12/24/36/48 dB per octave
//! - **Peak**: RBJ peaking bell with gain and Q
//! - **High cut**: Butterworth low-pass, 12/24/36/48 dB per octave
//!
//! Parameters live in a lock-free [`Parameters`] store shared between the
//! control side and the audio thread. [`EqProcessor`] snapshots them once
//! per block, redesigns the coefficients and filters both channels in place
//! without allocating, locking or logging.
//!
//! Host integration (plugin formats, editors, state serialization) is not
//! part of this crate. A shell registers its controls from
//! [`PARAMETER_LAYOUT`](params::PARAMETER_LAYOUT) and forwards values to
//! [`Parameters::set`].

pub mod error;
pub mod filters;
pub mod params;
pub mod processor;
pub mod settings;
pub mod units;

pub use error::{Error, Result};
pub use filters::cascade::Slope;
pub use params::{ParamId, ParameterSource, Parameters};
pub use processor::EqProcessor;
pub use settings::ChainSettings;
