//! Scan result cache.
//!
//! Networks discovered by the last scan, in discovery order. The cache is
//! reset wholesale when a scan starts and never freed piecemeal; records
//! past capacity are silently discarded, matching classic Arduino shield
//! behaviour.

use heapless::Vec;

use crate::sdk::ScanRecord;
use crate::wl::{EncryptionType, WL_NETWORKS_LIST_MAXNUM};

/// Fixed-capacity cache of the most recent scan.
#[derive(Default)]
pub struct ScanCache {
    records: Vec<ScanRecord, WL_NETWORKS_LIST_MAXNUM>,
}

impl ScanCache {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Drop all cached records.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Cache one record; a record past capacity is discarded.
    pub fn push(&mut self, record: &ScanRecord) {
        let _ = self.records.push(record.clone());
    }

    /// Number of cached networks.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// SSID of the `index`-th network, `None` out of bounds.
    pub fn ssid(&self, index: usize) -> Option<&str> {
        self.records.get(index).map(|r| r.ssid.as_str())
    }

    /// RSSI of the `index`-th network in dBm, `None` out of bounds.
    pub fn rssi(&self, index: usize) -> Option<i32> {
        self.records.get(index).map(|r| r.rssi)
    }

    /// Encryption code of the `index`-th network, `None` out of bounds.
    pub fn encryption_type(&self, index: usize) -> Option<EncryptionType> {
        self.records
            .get(index)
            .map(|r| EncryptionType::from_security(r.security))
    }

    pub fn is_full(&self) -> bool {
        self.records.is_full()
    }
}
