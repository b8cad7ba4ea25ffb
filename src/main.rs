// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::Args;
use clap::Parser as _;
use edgefirst_scancloud::{
    config::{Settings, topic_key},
    convert::ScanToCloudConverter,
    lidar::Error,
    node::ScanPublisher,
    scan_source::ZenohScanSource,
    sink::ZenohSink,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.rust_log)
        .init();

    let Settings {
        converter,
        robot_namespace,
        topic_name,
    } = args.load_params()?.resolve();
    let output_key = topic_key(&robot_namespace, &topic_name).map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!(
        "frame {} range ({}, {}) min intensity {} noise {} convention {}",
        converter.frame_id,
        converter.min_range,
        converter.max_range,
        converter.min_intensity,
        converter.gaussian_noise,
        converter.convention
    );

    let session = zenoh::open(zenoh::Config::try_from(&args)?)
        .await
        .map_err(|e| {
            error!("failed to open zenoh session: {:?}", e);
            Error::from(e)
        })?;

    let sink = match output_key {
        Some(key) => {
            let sink = ZenohSink::declare(&session, key).await?;
            info!("publishing point clouds on {}", sink.key());
            Some(sink)
        }
        None => None,
    };

    let mut source = ZenohScanSource::declare(&session, &args.scan_topic).await?;
    info!("subscribed to scans on {}", args.scan_topic);

    let mut node = ScanPublisher::new(ScanToCloudConverter::new(converter), sink);
    node.run(&mut source).await;

    Ok(())
}
