// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Converter configuration and parameter resolution.
//!
//! Parameters arrive as a sparse block (a JSON parameter file and/or command
//! line options). [`Params::resolve`] substitutes a documented default for
//! every missing option and logs each substitution, then freezes the result
//! into [`Settings`]. Nothing here is re-read after startup.

use crate::lidar::{CoordinateConvention, Error};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

pub const DEFAULT_FRAME_ID: &str = "/world";
pub const DEFAULT_TOPIC: &str = "/points";
pub const DEFAULT_NAMESPACE: &str = "/";

/// Immutable per-load converter configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ConverterConfig {
    /// Lower range clamp, combined with the sensor minimum via `max()`
    pub min_range: f64,
    /// Upper range clamp, combined with the sensor maximum via `min()`
    pub max_range: f64,
    /// Points with lower intensity are dropped
    pub min_intensity: f64,
    /// Standard deviation of additive range noise, zero disables
    pub gaussian_noise: f64,
    /// Header frame id of every output cloud
    pub frame_id: String,
    pub convention: CoordinateConvention,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            min_range: 0.0,
            max_range: f64::INFINITY,
            min_intensity: f64::MIN,
            gaussian_noise: 0.0,
            frame_id: DEFAULT_FRAME_ID.to_string(),
            convention: CoordinateConvention::default(),
        }
    }
}

/// Sparse parameter block, every option may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    #[serde(alias = "robotNamespace")]
    pub robot_namespace: Option<String>,
    #[serde(alias = "frameName")]
    pub frame_name: Option<String>,
    pub min_range: Option<f64>,
    pub max_range: Option<f64>,
    pub min_intensity: Option<f64>,
    #[serde(alias = "topicName")]
    pub topic_name: Option<String>,
    #[serde(alias = "gaussianNoise")]
    pub gaussian_noise: Option<f64>,
    pub convention: Option<CoordinateConvention>,
}

/// Fully resolved node settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub converter: ConverterConfig,
    pub robot_namespace: String,
    /// Output topic, empty disables publishing
    pub topic_name: String,
}

impl Params {
    /// Load a parameter block from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        let params = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(params)
    }

    /// Overlay `other` on top of `self`; options present in `other` win.
    pub fn merge(self, other: Params) -> Params {
        Params {
            robot_namespace: other.robot_namespace.or(self.robot_namespace),
            frame_name: other.frame_name.or(self.frame_name),
            min_range: other.min_range.or(self.min_range),
            max_range: other.max_range.or(self.max_range),
            min_intensity: other.min_intensity.or(self.min_intensity),
            topic_name: other.topic_name.or(self.topic_name),
            gaussian_noise: other.gaussian_noise.or(self.gaussian_noise),
            convention: other.convention.or(self.convention),
        }
    }

    /// Substitute defaults for missing options, logging each one.
    pub fn resolve(self) -> Settings {
        let defaults = ConverterConfig::default();

        let robot_namespace = self
            .robot_namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let frame_id = self.frame_name.unwrap_or_else(|| {
            info!("missing <frame_name>, defaults to {}", DEFAULT_FRAME_ID);
            defaults.frame_id.clone()
        });

        let min_range = self.min_range.unwrap_or_else(|| {
            info!("missing <min_range>, defaults to 0");
            defaults.min_range
        });

        let max_range = self.max_range.unwrap_or_else(|| {
            info!("missing <max_range>, defaults to infinity");
            defaults.max_range
        });

        let min_intensity = self.min_intensity.unwrap_or_else(|| {
            info!("missing <min_intensity>, defaults to no clipping");
            defaults.min_intensity
        });

        let topic_name = self.topic_name.unwrap_or_else(|| {
            info!("missing <topic_name>, defaults to {}", DEFAULT_TOPIC);
            DEFAULT_TOPIC.to_string()
        });

        let gaussian_noise = self.gaussian_noise.unwrap_or_else(|| {
            info!("missing <gaussian_noise>, defaults to 0.0");
            defaults.gaussian_noise
        });

        let convention = self.convention.unwrap_or(defaults.convention);

        Settings {
            converter: ConverterConfig {
                min_range,
                max_range,
                min_intensity,
                gaussian_noise,
                frame_id,
                convention,
            },
            robot_namespace,
            topic_name,
        }
    }
}

impl Settings {
    /// Zenoh key expression for the output topic, `None` when publishing is
    /// disabled.
    pub fn topic_key(&self) -> Result<Option<String>, Error> {
        topic_key(&self.robot_namespace, &self.topic_name)
    }
}

/// Map a ROS-style namespace and topic onto a ROS 2 bridge key expression.
///
/// Absolute topics ignore the namespace: `("/robot", "/points")` maps to
/// `rt/points` while `("/robot", "points")` maps to `rt/robot/points`.
///
/// An empty topic disables publishing and yields `Ok(None)`. A non-empty
/// topic with no name segments, such as `"/"`, is a configuration error.
pub fn topic_key(namespace: &str, topic: &str) -> Result<Option<String>, Error> {
    if topic.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = if topic.starts_with('/') {
        topic.split('/').filter(|s| !s.is_empty()).collect()
    } else {
        namespace
            .split('/')
            .chain(topic.split('/'))
            .filter(|s| !s.is_empty())
            .collect()
    };

    if parts.is_empty() {
        return Err(Error::Config(format!(
            "topic {:?} in namespace {:?} names no key",
            topic, namespace
        )));
    }

    Ok(Some(format!("rt/{}", parts.join("/"))))
}
