// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! EdgeFirst Scan Cloud Library
//!
//! Converts spherical laser scans from a simulated multi-beam LiDAR into
//! ROS PointCloud2 messages and publishes them over Zenoh.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────────┐     ┌─────────────────┐
//! │  ScanSource     │ ──► │ ScanToCloudConverter │ ──► │  CloudSink      │
//! │  (zenoh/test)   │     │ (gating, noise, xyz) │     │  (zenoh/test)   │
//! └─────────────────┘     └──────────────────────┘     └─────────────────┘
//!                                    │
//!                                    ▼
//!                   ┌─────────────────────────────────┐
//!                   │  formats: 32-byte point records │
//!                   │  x y z · intensity ring ·       │
//!                   └─────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`convert`]: Scan grid to PointCloud2 conversion
//! - [`formats`]: Point record layout and field descriptors
//! - [`noise`]: Gaussian range noise
//! - [`scan`]: Input scan grid
//! - [`config`]: Converter configuration and parameter resolution
//! - [`lidar`]: Error type and coordinate conventions
//! - [`scan_source`] / [`sink`]: Input and output abstractions
//! - [`node`]: Source → converter → sink wiring
//!
//! # Example
//!
//! ```ignore
//! use edgefirst_scancloud::{ConverterConfig, ScanToCloudConverter};
//!
//! let converter = ScanToCloudConverter::new(ConverterConfig {
//!     min_range: 0.9,
//!     max_range: 130.0,
//!     ..Default::default()
//! });
//! let cloud = converter.convert(&scan)?;
//! assert_eq!(cloud.row_step, cloud.width * cloud.point_step);
//! ```

pub mod config;
pub mod convert;
pub mod formats;
pub mod lidar;
pub mod node;
pub mod noise;
pub mod scan;
pub mod scan_source;
pub mod sink;

// Re-exports for convenience
pub use config::{ConverterConfig, Params, Settings};
pub use convert::ScanToCloudConverter;
pub use formats::{POINT_STEP, PointFieldType, PointRecord};
pub use lidar::{CoordinateConvention, Error};
pub use node::{NodeStats, Outcome, ScanPublisher};
pub use scan::ScanGrid;
pub use scan_source::ScanSource;
pub use sink::CloudSink;
