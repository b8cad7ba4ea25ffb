// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Spherical scan to PointCloud2 conversion.
//!
//! Each accepted grid sample becomes one 32-byte record (see
//! [`crate::formats`]). The output buffer is sized for the whole grid up
//! front, filled with accepted points in `(azimuth, elevation)` order and
//! truncated to the emitted count.
//!
//! # Gating
//!
//! A sample is kept when `min < r < max` and `intensity >= min_intensity`,
//! with `min = max(config.min_range, scan.range_min)` and
//! `max = min(config.max_range, scan.range_max)`. When noise is enabled the
//! perturbed range must pass the band test again; intensity is only tested
//! once.

use crate::{
    config::ConverterConfig,
    formats::{POINT_STEP, write_point_32byte, xyz_intensity_ring_fields},
    lidar::Error,
    noise::sample_gaussian,
    scan::ScanGrid,
};
use edgefirst_schemas::{sensor_msgs::PointCloud2, std_msgs::Header};
use rand::Rng;
use tracing::{instrument, trace};

/// Stateless converter holding the immutable configuration.
#[derive(Clone, Debug, Default)]
pub struct ScanToCloudConverter {
    config: ConverterConfig,
}

/// Angle of sample `index` out of `count` evenly spread over
/// `[min, min + span]`. A single sample sits at `min`.
#[inline]
fn sample_angle(index: usize, count: usize, min: f64, span: f64) -> f64 {
    if count > 1 {
        index as f64 * span / (count - 1) as f64 + min
    } else {
        min
    }
}

impl ScanToCloudConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert a scan, drawing noise from the thread-local generator.
    pub fn convert(&self, scan: &ScanGrid) -> Result<PointCloud2, Error> {
        self.convert_with_rng(scan, &mut rand::thread_rng())
    }

    /// Convert a scan, drawing noise from `rng`.
    ///
    /// `rng` is only consulted for accepted samples and only when
    /// `gaussian_noise` is non-zero.
    #[instrument(skip_all, fields(count = scan.count, vertical_count = scan.vertical_count))]
    pub fn convert_with_rng<R: Rng + ?Sized>(
        &self,
        scan: &ScanGrid,
        rng: &mut R,
    ) -> Result<PointCloud2, Error> {
        scan.validate()?;

        let config = &self.config;
        let min_range = config.min_range.max(scan.range_min);
        let max_range = config.max_range.min(scan.range_max);
        let min_intensity = config.min_intensity;

        let azimuth_span = scan.angle_max - scan.angle_min;
        let elevation_span = scan.vertical_angle_max - scan.vertical_angle_min;

        let count = scan.count as usize;
        let vertical_count = scan.vertical_count as usize;

        let mut data = vec![0u8; scan.n_samples() * POINT_STEP];
        let mut n_points = 0;

        for i in 0..count {
            let yaw = sample_angle(i, count, scan.angle_min, azimuth_span);
            let (sin_yaw, cos_yaw) = yaw.sin_cos();

            for j in 0..vertical_count {
                let index = scan.index(i, j);
                let mut r = scan.ranges[index];
                let intensity = scan.intensities[index];

                if r <= min_range || r >= max_range || intensity < min_intensity {
                    continue;
                }

                if config.gaussian_noise != 0.0 {
                    r += sample_gaussian(rng, 0.0, config.gaussian_noise);
                }

                if !(min_range < r && r < max_range) {
                    continue;
                }

                let pitch = sample_angle(j, vertical_count, scan.vertical_angle_min, elevation_span);
                let (sin_pitch, cos_pitch) = pitch.sin_cos();

                write_point_32byte(
                    &mut data,
                    n_points,
                    (r * cos_pitch * cos_yaw) as f32,
                    (r * cos_pitch * sin_yaw) as f32,
                    (config.convention.z_sign() * r * sin_pitch) as f32,
                    intensity as f32,
                    config.convention.ring(j, vertical_count),
                );
                n_points += 1;
            }
        }

        let row_step = n_points * POINT_STEP;
        data.truncate(row_step);
        data.shrink_to_fit();

        trace!("emitted {} of {} samples", n_points, scan.n_samples());

        Ok(PointCloud2 {
            header: Header {
                stamp: scan.stamp.clone(),
                frame_id: config.frame_id.clone(),
            },
            height: 1,
            width: n_points as u32,
            fields: xyz_intensity_ring_fields(),
            is_bigendian: false,
            point_step: POINT_STEP as u32,
            row_step: row_step as u32,
            data,
            is_dense: true,
        })
    }
}
