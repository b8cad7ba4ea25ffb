// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Integration tests for scan conversion against a synthetic 16-beam scan.
//!
//! The scan models a spinning sensor surrounded by a cylinder wall of radius
//! 10 m, with a few dropouts and dim returns sprinkled in.

use edgefirst_scancloud::{
    ConverterConfig, CoordinateConvention, POINT_STEP, PointRecord, ScanGrid,
    ScanToCloudConverter,
    formats::{PointFieldType, xyz_intensity_ring_fields},
};
use edgefirst_schemas::builtin_interfaces::Time;
use rand::{SeedableRng, rngs::SmallRng};
use std::f64::consts::PI;

const COLUMNS: u32 = 360;
const BEAMS: u32 = 16;
const WALL: f64 = 10.0;

fn vlp16_scan() -> ScanGrid {
    let vertical_min = -15.0f64.to_radians();
    let vertical_max = 15.0f64.to_radians();
    let n = (COLUMNS * BEAMS) as usize;

    let mut ranges = vec![0.0; n];
    let mut intensities = vec![0.0; n];
    for j in 0..BEAMS as usize {
        let pitch = vertical_min + j as f64 * (vertical_max - vertical_min) / (BEAMS - 1) as f64;
        for i in 0..COLUMNS as usize {
            let index = i + j * COLUMNS as usize;
            ranges[index] = if i % 90 == 0 {
                f64::INFINITY
            } else {
                WALL / pitch.cos()
            };
            intensities[index] = if i % 45 == 1 { 5.0 } else { 100.0 };
        }
    }

    ScanGrid {
        stamp: Time {
            sec: 1700,
            nanosec: 500_000_000,
        },
        angle_min: -PI,
        angle_max: PI,
        range_min: 0.9,
        range_max: 130.0,
        count: COLUMNS,
        vertical_angle_min: vertical_min,
        vertical_angle_max: vertical_max,
        vertical_count: BEAMS,
        ranges,
        intensities,
    }
}

fn points(data: &[u8]) -> Vec<PointRecord> {
    PointRecord::iter(data).collect()
}

#[test]
fn test_cloud_layout() {
    let cloud = ScanToCloudConverter::default()
        .convert(&vlp16_scan())
        .unwrap();

    assert_eq!(cloud.height, 1);
    assert_eq!(cloud.point_step as usize, POINT_STEP);
    assert_eq!(cloud.row_step, cloud.width * cloud.point_step);
    assert_eq!(cloud.data.len(), cloud.row_step as usize);
    assert!(cloud.is_dense);
    assert!(!cloud.is_bigendian);
    assert_eq!(cloud.header.stamp.sec, 1700);
    assert_eq!(cloud.header.stamp.nanosec, 500_000_000);

    let expected = xyz_intensity_ring_fields();
    assert_eq!(cloud.fields.len(), expected.len());
    for (a, b) in cloud.fields.iter().zip(&expected) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.offset, b.offset);
        assert_eq!(a.datatype, b.datatype);
    }
    assert_eq!(cloud.fields[4].datatype, PointFieldType::UINT16 as u8);
}

#[test]
fn test_infinite_returns_dropped() {
    let cloud = ScanToCloudConverter::default()
        .convert(&vlp16_scan())
        .unwrap();

    // Columns 0, 90, 180, 270 have no return on any beam.
    assert_eq!(cloud.width, (COLUMNS - 4) * BEAMS);
}

#[test]
fn test_points_on_wall() {
    let cloud = ScanToCloudConverter::default()
        .convert(&vlp16_scan())
        .unwrap();

    for p in points(&cloud.data) {
        let horizontal = ((p.x as f64).powi(2) + (p.y as f64).powi(2)).sqrt();
        assert!((horizontal - WALL).abs() < 1e-3, "horizontal {}", horizontal);
        assert!(p.ring < BEAMS as u16);
    }
}

#[test]
fn test_ring_follows_elevation() {
    let scan = vlp16_scan();

    let standard = ScanToCloudConverter::default().convert(&scan).unwrap();
    for p in points(&standard.data) {
        // Ring 0 is the lowest beam: z increases with ring.
        let pitch = (-15.0f64 + 2.0 * p.ring as f64).to_radians();
        assert!((p.z as f64 - WALL * pitch.tan()).abs() < 1e-3);
    }

    let legacy = ScanToCloudConverter::new(ConverterConfig {
        convention: CoordinateConvention::Legacy,
        ..Default::default()
    })
    .convert(&scan)
    .unwrap();
    for p in points(&legacy.data) {
        // Legacy numbers rings from the top and inverts z, so ring 0 sits
        // at -15° in the flipped frame, same as the standard ring 0.
        let pitch = (-15.0f64 + 2.0 * p.ring as f64).to_radians();
        assert!((p.z as f64 - WALL * pitch.tan()).abs() < 1e-3);
    }
}

#[test]
fn test_intensity_clip() {
    let converter = ScanToCloudConverter::new(ConverterConfig {
        min_intensity: 10.0,
        ..Default::default()
    });
    let cloud = converter.convert(&vlp16_scan()).unwrap();

    // Dim columns (i % 45 == 1) never coincide with dropout columns.
    let dim_columns = (0..COLUMNS).filter(|i| i % 45 == 1).count() as u32;
    assert_eq!(cloud.width, (COLUMNS - 4 - dim_columns) * BEAMS);
    assert!(points(&cloud.data).iter().all(|p| p.intensity >= 10.0));
}

#[test]
fn test_configured_band_narrower_than_sensor() {
    // Beams sit at odd degrees, ±15° hits the wall at ~10.35 m. A limit
    // between the ±13° and ±15° ranges cuts only the outermost beams.
    let converter = ScanToCloudConverter::new(ConverterConfig {
        max_range: WALL / 14.0f64.to_radians().cos(),
        ..Default::default()
    });
    let cloud = converter.convert(&vlp16_scan()).unwrap();

    assert_eq!(cloud.width, (COLUMNS - 4) * (BEAMS - 2));
    assert!(points(&cloud.data).iter().all(|p| p.ring != 0 && p.ring != 15));
}

#[test]
fn test_noise_stays_in_band() {
    let converter = ScanToCloudConverter::new(ConverterConfig {
        min_range: 10.2,
        max_range: 10.3,
        gaussian_noise: 0.05,
        ..Default::default()
    });
    let mut rng = SmallRng::seed_from_u64(2024);
    let cloud = converter
        .convert_with_rng(&vlp16_scan(), &mut rng)
        .unwrap();

    assert!(cloud.width > 0);
    for p in points(&cloud.data) {
        let r = ((p.x as f64).powi(2) + (p.y as f64).powi(2) + (p.z as f64).powi(2)).sqrt();
        assert!(r > 10.2 - 1e-4 && r < 10.3 + 1e-4, "range {}", r);
    }
}

#[test]
fn test_repeatable_without_noise() {
    let scan = vlp16_scan();
    let converter = ScanToCloudConverter::default();

    let a = converter.convert(&scan).unwrap();
    let b = converter.convert(&scan).unwrap();
    assert_eq!(a.data, b.data);
}
