// SPDX-License-Identifier: LGPL-3.0-or-later

//! Errors for the non-real-time setup paths.
//!
//! Nothing in [`EqProcessor::process`](crate::processor::EqProcessor::process)
//! returns or constructs these; they come from `prepare` and from parameter
//! lookups done by the host side.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unknown parameter id {0:?}")]
    UnknownParameter(String),
    #[error("slope choice index {0} out of range (expected 0..=3)")]
    InvalidSlope(usize),
    #[error("sample rate must be finite and greater than zero, got {0}")]
    InvalidSampleRate(f32),
    #[error("maximum block size must be greater than zero")]
    InvalidBlockSize,
}

pub type Result<T> = std::result::Result<T, Error>;
