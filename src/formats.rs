// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Packed point record layout for PointCloud2 messages.
//!
//! Every point is a fixed 32-byte little-endian record. Unused bytes are
//! zero so consumers that copy whole records see deterministic data.
//!
//! ```text
//! ┌───────┬───────┬───────┬─────┬───────────┬──────┬───────┐
//! │ x:f32 │ y:f32 │ z:f32 │ pad │ intensity │ ring │  pad  │
//! │ 0     │ 4     │ 8     │ 12  │ 16        │ 20   │ 22-31 │
//! └───────┴───────┴───────┴─────┴───────────┴──────┴───────┘
//! ```

use edgefirst_schemas::sensor_msgs::PointField;

/// Byte stride of one point record.
pub const POINT_STEP: usize = 32;

const X_OFFSET: usize = 0;
const Y_OFFSET: usize = 4;
const Z_OFFSET: usize = 8;
const INTENSITY_OFFSET: usize = 16;
const RING_OFFSET: usize = 20;

/// Point field data types for PointCloud2 messages.
///
/// These values correspond to the ROS sensor_msgs/PointField datatype field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[allow(dead_code)]
pub enum PointFieldType {
    INT8 = 1,
    UINT8 = 2,
    INT16 = 3,
    UINT16 = 4,
    INT32 = 5,
    UINT32 = 6,
    FLOAT32 = 7,
    FLOAT64 = 8,
}

fn field(name: &str, offset: usize, datatype: PointFieldType) -> PointField {
    PointField {
        name: String::from(name),
        offset: offset as u32,
        datatype: datatype as u8,
        count: 1,
    }
}

/// Build the XYZ + intensity + ring point fields (32-byte stride).
///
/// - x: FLOAT32 at offset 0
/// - y: FLOAT32 at offset 4
/// - z: FLOAT32 at offset 8
/// - intensity: FLOAT32 at offset 16
/// - ring: UINT16 at offset 20
pub fn xyz_intensity_ring_fields() -> Vec<PointField> {
    vec![
        field("x", X_OFFSET, PointFieldType::FLOAT32),
        field("y", Y_OFFSET, PointFieldType::FLOAT32),
        field("z", Z_OFFSET, PointFieldType::FLOAT32),
        field("intensity", INTENSITY_OFFSET, PointFieldType::FLOAT32),
        field("ring", RING_OFFSET, PointFieldType::UINT16),
    ]
}

/// Write one point into the record slot `index` of `out`.
///
/// # Panics
///
/// Panics if `out` is shorter than `(index + 1) * POINT_STEP`.
#[inline]
pub fn write_point_32byte(
    out: &mut [u8],
    index: usize,
    x: f32,
    y: f32,
    z: f32,
    intensity: f32,
    ring: u16,
) {
    let record = &mut out[index * POINT_STEP..(index + 1) * POINT_STEP];
    record[X_OFFSET..X_OFFSET + 4].copy_from_slice(&x.to_le_bytes());
    record[Y_OFFSET..Y_OFFSET + 4].copy_from_slice(&y.to_le_bytes());
    record[Z_OFFSET..Z_OFFSET + 4].copy_from_slice(&z.to_le_bytes());
    record[INTENSITY_OFFSET..INTENSITY_OFFSET + 4].copy_from_slice(&intensity.to_le_bytes());
    record[RING_OFFSET..RING_OFFSET + 2].copy_from_slice(&ring.to_le_bytes());
}

/// Decoded view of one 32-byte record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
    pub ring: u16,
}

impl PointRecord {
    /// Read record `index` from a packed buffer.
    ///
    /// Returns `None` when the buffer does not hold that many records.
    pub fn read(data: &[u8], index: usize) -> Option<Self> {
        let record = data.get(index * POINT_STEP..(index + 1) * POINT_STEP)?;
        let f = |offset: usize| {
            f32::from_le_bytes([
                record[offset],
                record[offset + 1],
                record[offset + 2],
                record[offset + 3],
            ])
        };
        Some(Self {
            x: f(X_OFFSET),
            y: f(Y_OFFSET),
            z: f(Z_OFFSET),
            intensity: f(INTENSITY_OFFSET),
            ring: u16::from_le_bytes([record[RING_OFFSET], record[RING_OFFSET + 1]]),
        })
    }

    /// Iterate over every complete record in a packed buffer.
    pub fn iter(data: &[u8]) -> impl Iterator<Item = PointRecord> + '_ {
        (0..data.len() / POINT_STEP).filter_map(move |index| Self::read(data, index))
    }
}
