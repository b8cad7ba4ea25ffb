// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Spherical scan grid received from the simulator.
//!
//! A scan is a rectangular azimuth × elevation grid stored row-major by
//! elevation: the sample for azimuth column `i` and elevation row `j` lives
//! at `i + j * count`.
//!
//! ```text
//!              i = 0     1     2   ...  count-1
//! j = 0      ┌─────┬─────┬─────┬───┬─────┐
//! j = 1      │     │     │     │   │     │
//! ...        ├─────┼─────┼─────┼───┼─────┤
//! vcount-1   └─────┴─────┴─────┴───┴─────┘
//! ```

use crate::lidar::Error;
use edgefirst_schemas::{builtin_interfaces::Time, serde_cdr};
use serde::{Deserialize, Serialize};

/// One stamped laser scan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanGrid {
    /// Acquisition time of the scan
    pub stamp: Time,
    /// First azimuth angle in radians
    pub angle_min: f64,
    /// Last azimuth angle in radians
    pub angle_max: f64,
    /// Sensor-reported minimum valid range in meters
    pub range_min: f64,
    /// Sensor-reported maximum valid range in meters
    pub range_max: f64,
    /// Number of azimuth samples per elevation row
    pub count: u32,
    /// First elevation angle in radians
    pub vertical_angle_min: f64,
    /// Last elevation angle in radians
    pub vertical_angle_max: f64,
    /// Number of elevation rows
    pub vertical_count: u32,
    /// Range samples, `count * vertical_count` long
    pub ranges: Vec<f64>,
    /// Intensity samples, `count * vertical_count` long
    pub intensities: Vec<f64>,
}

impl ScanGrid {
    /// Number of samples the declared dimensions require.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.count as usize * self.vertical_count as usize
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.vertical_count == 0
    }

    /// Flat index of azimuth column `i` in elevation row `j`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.count as usize
    }

    /// Check that both sample arrays cover the declared grid.
    pub fn validate(&self) -> Result<(), Error> {
        let expected = self.n_samples();
        if self.ranges.len() < expected || self.intensities.len() < expected {
            return Err(Error::InvalidGridShape {
                expected,
                ranges: self.ranges.len(),
                intensities: self.intensities.len(),
            });
        }
        Ok(())
    }

    /// Decode a CDR-encoded scan.
    pub fn from_cdr(bytes: &[u8]) -> Result<Self, Error> {
        serde_cdr::deserialize(bytes).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Encode the scan as CDR.
    pub fn to_cdr(&self) -> Result<Vec<u8>, Error> {
        serde_cdr::serialize(self).map_err(|e| Error::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(count: u32, vertical_count: u32, samples: usize) -> ScanGrid {
        ScanGrid {
            stamp: Time { sec: 1, nanosec: 2 },
            angle_min: -1.0,
            angle_max: 1.0,
            range_min: 0.1,
            range_max: 100.0,
            count,
            vertical_angle_min: -0.2,
            vertical_angle_max: 0.2,
            vertical_count,
            ranges: vec![1.0; samples],
            intensities: vec![1.0; samples],
        }
    }

    #[test]
    fn test_index_layout() {
        let scan = grid(4, 3, 12);
        assert_eq!(scan.index(0, 0), 0);
        assert_eq!(scan.index(3, 0), 3);
        assert_eq!(scan.index(0, 1), 4);
        assert_eq!(scan.index(2, 2), 10);
    }

    #[test]
    fn test_validate() {
        assert!(grid(4, 3, 12).validate().is_ok());
        assert!(grid(4, 3, 20).validate().is_ok());
        assert!(grid(0, 3, 0).validate().is_ok());

        match grid(4, 3, 11).validate() {
            Err(Error::InvalidGridShape {
                expected,
                ranges,
                intensities,
            }) => {
                assert_eq!(expected, 12);
                assert_eq!(ranges, 11);
                assert_eq!(intensities, 11);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_short_intensities_rejected() {
        let mut scan = grid(2, 2, 4);
        scan.intensities.pop();
        assert!(matches!(
            scan.validate(),
            Err(Error::InvalidGridShape { intensities: 3, .. })
        ));
    }

    #[test]
    fn test_empty() {
        assert!(grid(0, 16, 0).is_empty());
        assert!(grid(16, 0, 0).is_empty());
        assert!(!grid(1, 1, 1).is_empty());
    }

    #[test]
    fn test_cdr_roundtrip() {
        let scan = grid(3, 2, 6);
        let bytes = scan.to_cdr().unwrap();
        let decoded = ScanGrid::from_cdr(&bytes).unwrap();
        assert_eq!(decoded.count, 3);
        assert_eq!(decoded.vertical_count, 2);
        assert_eq!(decoded.ranges, scan.ranges);
        assert_eq!(decoded.stamp.sec, 1);
        assert_eq!(decoded.stamp.nanosec, 2);
    }

    #[test]
    fn test_cdr_garbage_rejected() {
        assert!(matches!(
            ScanGrid::from_cdr(&[0x00, 0x01]),
            Err(Error::Decode(_))
        ));
    }
}
