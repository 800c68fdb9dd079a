// SPDX-License-Identifier: LGPL-3.0-or-later

//! Coefficient factories and the biquad stages built from them.
//!
//! Peak coefficients follow the RBJ Audio EQ Cookbook; cut filters are
//! Butterworth designs split into second-order sections. All coefficients
//! keep the cookbook signs for `a1`/`a2`.

pub mod butterworth;
pub mod cascade;
pub mod chain;
pub mod coeffs;
pub mod section;
