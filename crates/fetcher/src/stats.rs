//! Per-channel fetch accounting.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use pulse_core::channel::Channel;
use serde::Serialize;

/// Running totals for one channel.
#[derive(Debug, Clone, Serialize)]
pub struct FetchRecord {
    pub channel: Channel,
    pub fetches: u64,
    pub rows: u64,
    pub last_fetch: DateTime<Utc>,
}

/// Records fetch volume per channel.
pub struct FetchTracker {
    records: DashMap<Channel, FetchRecord>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn record_fetch(&self, channel: Channel, rows: usize) {
        self.records
            .entry(channel)
            .and_modify(|record| {
                record.fetches += 1;
                record.rows += rows as u64;
                record.last_fetch = Utc::now();
            })
            .or_insert_with(|| FetchRecord {
                channel,
                fetches: 1,
                rows: rows as u64,
                last_fetch: Utc::now(),
            });
    }

    pub fn record(&self, channel: Channel) -> Option<FetchRecord> {
        self.records.get(&channel).map(|r| r.clone())
    }

    pub fn records(&self) -> Vec<FetchRecord> {
        self.records.iter().map(|r| r.clone()).collect()
    }
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self::new()
    }
}
