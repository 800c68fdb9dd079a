// SPDX-License-Identifier: LGPL-3.0-or-later

//! # simple-eq-dsp
//!
//! Low-level DSP primitives for the `simple-eq` three-band equalizer.
//!
//! This crate holds the pieces that know nothing about equalizer bands,
//! slopes or parameters:
//!
//! - **Types**: biquad coefficients and per-channel delay memory
//! - **Filters**: the direct-form-I biquad kernel (per sample and per block)
//! - **Context**: scoped flush-to-zero / denormals-are-zero control
//!
//! ## Design
//!
//! Block kernels use runtime SIMD dispatch via the `multiversion` crate.
//! Each annotated function is compiled for AVX2+FMA, AVX, SSE4.1 and NEON
//! targets; the best variant is selected at startup.

pub mod context;
pub mod filters;
pub mod types;
