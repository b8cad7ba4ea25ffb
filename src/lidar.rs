// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Common types shared by the converter, the node and the binary.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common error type for scan conversion and publishing.
#[derive(Debug)]
pub enum Error {
    /// I/O error (parameter files, sockets)
    Io(std::io::Error),
    /// Scan sample arrays are shorter than `count * vertical_count`
    InvalidGridShape {
        expected: usize,
        ranges: usize,
        intensities: usize,
    },
    /// Inbound payload could not be decoded
    Decode(String),
    /// Outbound message could not be encoded
    Encode(String),
    /// Configuration error
    Config(String),
    /// Zenoh session or publisher error
    Zenoh(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::InvalidGridShape {
                expected,
                ranges,
                intensities,
            } => write!(
                f,
                "invalid grid shape: expected {} samples, got {} ranges and {} intensities",
                expected, ranges, intensities
            ),
            Error::Decode(msg) => write!(f, "decode error: {}", msg),
            Error::Encode(msg) => write!(f, "encode error: {}", msg),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Zenoh(msg) => write!(f, "zenoh error: {}", msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<zenoh::Error> for Error {
    fn from(err: zenoh::Error) -> Self {
        Error::Zenoh(err.to_string())
    }
}

/// Sign and ring mapping applied when projecting scan samples.
///
/// `Standard` keeps elevation positive-up and numbers rings from the lowest
/// elevation row. `Legacy` reproduces older simulators, which inverted `z`
/// and numbered rings from the top row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateConvention {
    #[default]
    Standard,
    Legacy,
}

impl CoordinateConvention {
    /// Multiplier applied to `r * sin(pitch)`.
    #[inline]
    pub fn z_sign(self) -> f64 {
        match self {
            CoordinateConvention::Standard => 1.0,
            CoordinateConvention::Legacy => -1.0,
        }
    }

    /// Ring index for elevation row `row` of a grid with `rows` rows.
    #[inline]
    pub fn ring(self, row: usize, rows: usize) -> u16 {
        match self {
            CoordinateConvention::Standard => row as u16,
            CoordinateConvention::Legacy => (rows - 1 - row) as u16,
        }
    }
}

impl fmt::Display for CoordinateConvention {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoordinateConvention::Standard => write!(f, "standard"),
            CoordinateConvention::Legacy => write!(f, "legacy"),
        }
    }
}
