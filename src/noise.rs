// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Gaussian range noise.
//!
//! Samples come from [`rand_distr::StandardNormal`] scaled and shifted to the
//! requested distribution. Passing the random source explicitly keeps
//! conversion deterministic under test: seed a `SmallRng` and the same scan
//! always produces the same perturbed cloud.

use rand::Rng;
use rand_distr::StandardNormal;

/// Draw one sample from `N(mean, stddev²)`.
#[inline]
pub fn sample_gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, stddev: f64) -> f64 {
    mean + stddev * rng.sample::<f64, _>(StandardNormal)
}
