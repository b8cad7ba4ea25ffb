// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use edgefirst_scancloud::{
    config::Params,
    lidar::{CoordinateConvention, Error},
};
use serde_json::json;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use zenoh::config::{Config, WhatAmI};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON parameter file with the same keys as the options below.  Command
    /// line and environment values override the file.
    #[arg(long, env)]
    pub params: Option<PathBuf>,

    /// Key expression the simulator publishes CDR-encoded scans on
    #[arg(long, env, default_value = "sim/velodyne/scan")]
    pub scan_topic: String,

    /// Namespace prefixed to a relative output topic
    #[arg(long, env)]
    pub robot_namespace: Option<String>,

    /// Frame id written to every point cloud header [default: /world]
    #[arg(long, env)]
    pub frame_name: Option<String>,

    /// Minimum range in meters, combined with the sensor minimum [default: 0]
    #[arg(long, env)]
    pub min_range: Option<f64>,

    /// Maximum range in meters, combined with the sensor maximum
    /// [default: infinity]
    #[arg(long, env)]
    pub max_range: Option<f64>,

    /// Points below this intensity are dropped [default: no clipping]
    #[arg(long, env, allow_negative_numbers = true)]
    pub min_intensity: Option<f64>,

    /// Point cloud output topic, an empty string disables publishing
    /// [default: /points]
    #[arg(long, env)]
    pub topic_name: Option<String>,

    /// Standard deviation of gaussian range noise in meters [default: 0]
    #[arg(long, env)]
    pub gaussian_noise: Option<f64>,

    /// Elevation sign and ring numbering convention [default: standard]
    #[arg(long, env, value_enum)]
    pub convention: Option<CoordinateConvention>,

    /// Application log level
    #[arg(long, env, default_value = "info")]
    pub rust_log: LevelFilter,

    /// zenoh connection mode
    #[arg(long, env, default_value = "peer")]
    mode: WhatAmI,

    /// connect to zenoh endpoints
    #[arg(long, env)]
    connect: Vec<String>,

    /// listen to zenoh endpoints
    #[arg(long, env)]
    listen: Vec<String>,

    /// disable zenoh multicast scouting
    #[arg(long, env)]
    no_multicast_scouting: bool,
}

impl Args {
    /// Parameter block from the file (if any) overlaid with explicit options.
    pub fn load_params(&self) -> Result<Params, Error> {
        let file = match &self.params {
            Some(path) => Params::from_file(path)?,
            None => Params::default(),
        };

        let cli = Params {
            robot_namespace: self.robot_namespace.clone(),
            frame_name: self.frame_name.clone(),
            min_range: self.min_range,
            max_range: self.max_range,
            min_intensity: self.min_intensity,
            topic_name: self.topic_name.clone(),
            gaussian_noise: self.gaussian_noise,
            convention: self.convention,
        };

        Ok(file.merge(cli))
    }
}

impl TryFrom<&Args> for Config {
    type Error = Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut config = Config::default();

        config.insert_json5("mode", &json!(args.mode).to_string())?;

        if !args.connect.is_empty() {
            config.insert_json5("connect/endpoints", &json!(args.connect).to_string())?;
        }

        if !args.listen.is_empty() {
            config.insert_json5("listen/endpoints", &json!(args.listen).to_string())?;
        }

        if args.no_multicast_scouting {
            config.insert_json5("scouting/multicast/enabled", &json!(false).to_string())?;
        }

        Ok(config)
    }
}
