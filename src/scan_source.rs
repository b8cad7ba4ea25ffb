// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Scan source abstraction.
//!
//! A [`ScanSource`] yields decoded [`ScanGrid`]s, enabling:
//!
//! - **Live operation**: Subscribing to the simulator's scan topic over Zenoh
//! - **Testing**: Replaying pre-encoded scan payloads
//!
//! # Example
//!
//! ```ignore
//! use edgefirst_scancloud::scan_source::{ScanSource, TestSource};
//!
//! let mut source = TestSource::from_scans(&scans)?;
//! while let Some(scan) = source.recv().await? {
//!     // Convert scan
//! }
//! ```

use crate::{lidar::Error, scan::ScanGrid};
use std::{future::Future, pin::Pin};
use zenoh::{handlers::FifoChannelHandler, pubsub::Subscriber, sample::Sample};

/// Trait for scan sources.
pub trait ScanSource: Send {
    /// Receive the next scan.
    ///
    /// # Returns
    /// - `Ok(Some(scan))` - A decoded scan
    /// - `Ok(None)` - The source is closed or exhausted
    /// - `Err` - The next payload could not be decoded; the source remains
    ///   usable
    fn recv<'a>(
        &'a mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ScanGrid>, Error>> + Send + 'a>>;
}

/// Zenoh subscriber delivering CDR-encoded scans.
pub struct ZenohScanSource {
    subscriber: Subscriber<FifoChannelHandler<Sample>>,
}

impl ZenohScanSource {
    /// Declare a subscriber on `key` and wrap it as a source.
    pub async fn declare(session: &zenoh::Session, key: &str) -> Result<Self, Error> {
        let subscriber = session.declare_subscriber(key.to_string()).await?;
        Ok(Self { subscriber })
    }
}

impl ScanSource for ZenohScanSource {
    fn recv<'a>(
        &'a mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ScanGrid>, Error>> + Send + 'a>> {
        Box::pin(async move {
            let sample = match self.subscriber.recv_async().await {
                Ok(sample) => sample,
                Err(_) => return Ok(None),
            };
            let payload = sample.payload().to_bytes();
            ScanGrid::from_cdr(&payload).map(Some)
        })
    }
}

/// Test scan source replaying encoded payloads in order.
pub struct TestSource {
    payloads: Vec<Vec<u8>>,
    index: usize,
}

impl TestSource {
    /// Create a source from raw CDR payloads.
    pub fn new(payloads: Vec<Vec<u8>>) -> Self {
        Self { payloads, index: 0 }
    }

    /// Create a source by encoding each scan.
    pub fn from_scans(scans: &[ScanGrid]) -> Result<Self, Error> {
        let payloads = scans
            .iter()
            .map(ScanGrid::to_cdr)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(payloads))
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.index < self.payloads.len()
    }
}

impl ScanSource for TestSource {
    fn recv<'a>(
        &'a mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ScanGrid>, Error>> + Send + 'a>> {
        Box::pin(async move {
            let Some(payload) = self.payloads.get(self.index) else {
                return Ok(None);
            };
            self.index += 1;
            ScanGrid::from_cdr(payload).map(Some)
        })
    }
}
