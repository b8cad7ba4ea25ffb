// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Scan-to-cloud publishing node.
//!
//! The node wires a [`ScanSource`] through the [`ScanToCloudConverter`] into
//! an optional [`CloudSink`]. A bad scan (undecodable payload, short sample
//! arrays) is logged and dropped; the next scan is processed normally.
//! Without a sink, scans are received and skipped without conversion.

use crate::{
    convert::ScanToCloudConverter, scan::ScanGrid, scan_source::ScanSource, sink::CloudSink,
};
use tracing::{info, info_span, trace, warn};

/// Result of handling one scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Cloud with this many points was handed to the sink, whether or not
    /// the sink accepted it
    Published(u32),
    /// No output configured, scan ignored
    Skipped,
    /// Scan could not be converted
    Dropped,
}

/// Counters since the node started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub received: u64,
    pub published: u64,
    pub skipped: u64,
    pub dropped: u64,
    pub publish_errors: u64,
}

pub struct ScanPublisher<S: CloudSink> {
    converter: ScanToCloudConverter,
    sink: Option<S>,
    stats: NodeStats,
}

impl<S: CloudSink> ScanPublisher<S> {
    /// Create a node; `sink = None` disables publishing.
    pub fn new(converter: ScanToCloudConverter, sink: Option<S>) -> Self {
        if sink.is_none() {
            info!("no output topic configured, point clouds will not be published");
        }
        Self {
            converter,
            sink,
            stats: NodeStats::default(),
        }
    }

    pub fn stats(&self) -> NodeStats {
        self.stats
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn converter(&self) -> &ScanToCloudConverter {
        &self.converter
    }

    /// Convert and publish one scan.
    pub async fn handle_scan(&mut self, scan: &ScanGrid) -> Outcome {
        self.stats.received += 1;

        let Some(sink) = self.sink.as_mut() else {
            self.stats.skipped += 1;
            return Outcome::Skipped;
        };

        let cloud = match info_span!("convert").in_scope(|| self.converter.convert(scan)) {
            Ok(cloud) => cloud,
            Err(e) => {
                warn!("dropping scan: {}", e);
                self.stats.dropped += 1;
                return Outcome::Dropped;
            }
        };

        let width = cloud.width;
        match sink.publish(cloud).await {
            Ok(()) => {
                trace!("published {} points", width);
                self.stats.published += 1;
            }
            Err(e) => {
                warn!("point cloud publish error: {}", e);
                self.stats.publish_errors += 1;
            }
        }
        Outcome::Published(width)
    }

    /// Process scans until the source closes.
    pub async fn run<Src: ScanSource + ?Sized>(&mut self, source: &mut Src) -> NodeStats {
        loop {
            let scan = match source.recv().await {
                Ok(Some(scan)) => scan,
                Ok(None) => break,
                Err(e) => {
                    warn!("dropping scan payload: {}", e);
                    self.stats.received += 1;
                    self.stats.dropped += 1;
                    continue;
                }
            };
            self.handle_scan(&scan).await;
        }

        info!(
            "scan source closed after {} scans ({} published, {} dropped)",
            self.stats.received, self.stats.published, self.stats.dropped
        );
        self.stats
    }
}
