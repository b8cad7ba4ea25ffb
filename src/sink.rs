// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Point cloud output sinks.
//!
//! A [`CloudSink`] takes ownership of a finished cloud. Publishing is fire
//! and forget: callers log a returned error and move on to the next scan.

use crate::lidar::Error;
use edgefirst_schemas::{sensor_msgs::PointCloud2, serde_cdr};
use std::{future::Future, pin::Pin};
use zenoh::{
    bytes::{Encoding, ZBytes},
    pubsub::Publisher,
    qos::{CongestionControl, Priority},
};

/// Trait for point cloud outputs.
pub trait CloudSink: Send {
    /// Hand a completed cloud to the output.
    fn publish<'a>(
        &'a mut self,
        cloud: PointCloud2,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;
}

/// Encode a cloud as a CDR payload with its ROS 2 schema encoding.
pub fn encode_cloud(cloud: &PointCloud2) -> Result<(ZBytes, Encoding), Error> {
    let msg = serde_cdr::serialize(cloud).map_err(|e| Error::Encode(e.to_string()))?;
    let enc = Encoding::APPLICATION_CDR.with_schema("sensor_msgs/msg/PointCloud2");
    Ok((ZBytes::from(msg), enc))
}

/// Zenoh publisher sink.
pub struct ZenohSink {
    publisher: Publisher<'static>,
    key: String,
}

impl ZenohSink {
    /// Declare a publisher on `key`.
    ///
    /// Late clouds are dropped rather than queued.
    pub async fn declare(session: &zenoh::Session, key: String) -> Result<Self, Error> {
        let publisher = session
            .declare_publisher(key.clone())
            .priority(Priority::DataHigh)
            .congestion_control(CongestionControl::Drop)
            .await?;
        Ok(Self { publisher, key })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CloudSink for ZenohSink {
    fn publish<'a>(
        &'a mut self,
        cloud: PointCloud2,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
        Box::pin(async move {
            let (msg, enc) = encode_cloud(&cloud)?;
            self.publisher.put(msg).encoding(enc).await?;
            Ok(())
        })
    }
}

/// In-memory sink collecting every published cloud.
#[derive(Default)]
pub struct CollectSink {
    clouds: Vec<PointCloud2>,
    fail: bool,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every publish fails.
    pub fn failing() -> Self {
        Self {
            clouds: Vec::new(),
            fail: true,
        }
    }

    pub fn clouds(&self) -> &[PointCloud2] {
        &self.clouds
    }
}

impl CloudSink for CollectSink {
    fn publish<'a>(
        &'a mut self,
        cloud: PointCloud2,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
        Box::pin(async move {
            if self.fail {
                return Err(Error::Zenoh("sink unavailable".to_string()));
            }
            self.clouds.push(cloud);
            Ok(())
        })
    }
}
