//! Per-channel report fetching and dispatch.

use chrono::{DateTime, Duration, Utc};
use pulse_core::channel::{Channel, EntityGranularity, TimeGranularity};
use pulse_core::credentials::ChannelCredentials;
use pulse_core::error::{PulseError, PulseResult};
use pulse_core::frame::ReportFrame;
use pulse_reporters::{
    GoogleAdsApi, GoogleAdsReporter, GoogleAdsReporting, ReportRequestOverrides, SearchAdsApi,
    SearchAdsReporter, SearchAdsReporting, SnapchatApi, SnapchatReporter, SnapchatReporting,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::normalize;
use crate::stats::FetchTracker;

/// Entity identifier columns requested from Snapchat alongside the metrics.
const SNAPCHAT_ENTITY_COLUMNS: [&str; 2] = ["id", "name"];

/// Fetches one channel's performance report at a fixed granularity pair.
pub struct ChannelPerformanceFetcher {
    channel: Channel,
    time_granularity: TimeGranularity,
    entity_granularity: EntityGranularity,
    raw_performance_columns: Vec<String>,
    tracker: Option<Arc<FetchTracker>>,
}

impl ChannelPerformanceFetcher {
    /// Build a fetcher from raw boundary strings. Fails on the first string
    /// that is not a known enum member; the column list is stored verbatim.
    pub fn new(
        raw_channel: &str,
        raw_time_granularity: &str,
        raw_entity_granularity: &str,
        raw_performance_columns: Vec<String>,
    ) -> PulseResult<Self> {
        Ok(Self {
            channel: raw_channel.parse()?,
            time_granularity: raw_time_granularity.parse()?,
            entity_granularity: raw_entity_granularity.parse()?,
            raw_performance_columns,
            tracker: None,
        })
    }

    /// Attach a tracker that records per-channel fetch statistics.
    pub fn with_tracker(mut self, tracker: Arc<FetchTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn time_granularity(&self) -> TimeGranularity {
        self.time_granularity
    }

    pub fn entity_granularity(&self) -> EntityGranularity {
        self.entity_granularity
    }

    pub fn raw_performance_columns(&self) -> &[String] {
        &self.raw_performance_columns
    }

    /// Vendor token for the configured time granularity.
    pub fn vendor_time_granularity(&self) -> &'static str {
        match (self.channel, self.time_granularity) {
            (Channel::GoogleAds, TimeGranularity::Hourly) => "hourly",
            (Channel::GoogleAds, TimeGranularity::Daily) => "daily",
            (Channel::Snapchat, TimeGranularity::Hourly) => "HOUR",
            (Channel::Snapchat, TimeGranularity::Daily) => "DAY",
            (Channel::AppleSearchAds, TimeGranularity::Hourly) => "HOURLY",
            (Channel::AppleSearchAds, TimeGranularity::Daily) => "DAILY",
        }
    }

    /// Vendor token for the configured entity granularity.
    pub fn vendor_entity_granularity(&self) -> &'static str {
        match (self.channel, self.entity_granularity) {
            (Channel::GoogleAds, EntityGranularity::Campaign) => "campaign",
            (Channel::GoogleAds, EntityGranularity::AdGroup) => "ad_group",
            (Channel::GoogleAds, EntityGranularity::Ad) => "ad",
            (Channel::Snapchat, EntityGranularity::Campaign) => "campaign",
            (Channel::Snapchat, EntityGranularity::AdGroup) => "adsquad",
            (Channel::Snapchat, EntityGranularity::Ad) => "ad",
            (Channel::AppleSearchAds, EntityGranularity::Campaign) => "campaign",
            (Channel::AppleSearchAds, EntityGranularity::AdGroup) => "adgroup",
            (Channel::AppleSearchAds, EntityGranularity::Ad) => "keyword",
        }
    }

    /// Metric columns requested from the vendor. Snapchat requires an
    /// explicit list; the other channels use caller-supplied or reporter
    /// defaults.
    pub fn vendor_performance_columns(&self) -> Vec<String> {
        match self.channel {
            Channel::Snapchat => vec![
                "impressions".to_string(),
                "swipes".to_string(),
                "spend".to_string(),
            ],
            Channel::GoogleAds | Channel::AppleSearchAds => Vec::new(),
        }
    }

    /// Authenticate, fetch one report for `[start, end]`, and normalize it.
    /// Reporter failures surface unmodified.
    pub fn run(
        &self,
        credentials: &ChannelCredentials,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PulseResult<ReportFrame> {
        let fetch_id = Uuid::new_v4();
        info!(
            fetch_id = %fetch_id,
            channel = %self.channel,
            time_granularity = %self.time_granularity,
            entity_granularity = %self.entity_granularity,
            start = %start,
            end = %end,
            "Fetching channel performance report"
        );
        metrics::counter!("fetch.requests", "channel" => self.channel.as_str()).increment(1);

        let report = match (self.channel, credentials) {
            (Channel::GoogleAds, ChannelCredentials::GoogleAds(creds)) => {
                let api = GoogleAdsApi::new(creds.clone());
                let reporter = GoogleAdsReporter::new(api);
                self.fetch_google_ads(&reporter, start, end)?
            }
            (Channel::Snapchat, ChannelCredentials::Snapchat(creds)) => {
                let api = SnapchatApi::new(creds.clone());
                let mut reporter = SnapchatReporter::new(api);
                self.fetch_snapchat(&mut reporter, start, end)?
            }
            (Channel::AppleSearchAds, ChannelCredentials::AppleSearchAds(creds)) => {
                let api = SearchAdsApi::new(creds.clone());
                let reporter = SearchAdsReporter::new(api);
                self.fetch_apple_search_ads(&reporter, start, end)?
            }
            (expected, other) => {
                return Err(PulseError::CredentialMismatch {
                    expected,
                    provided: other.channel(),
                });
            }
        };

        let report = self.process(report)?;

        metrics::counter!("fetch.rows", "channel" => self.channel.as_str())
            .increment(report.row_count() as u64);
        if let Some(tracker) = &self.tracker {
            tracker.record_fetch(self.channel, report.row_count());
        }
        info!(
            fetch_id = %fetch_id,
            rows = report.row_count(),
            "Report fetched and normalized"
        );
        Ok(report)
    }

    /// Google Ads: performance report first, then selected-conversions
    /// enrichment merged with the same translated parameters.
    pub fn fetch_google_ads(
        &self,
        reporter: &dyn GoogleAdsReporting,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PulseResult<ReportFrame> {
        let report = reporter.performance_report(
            start,
            end,
            self.vendor_entity_granularity(),
            self.vendor_time_granularity(),
        )?;
        let report = reporter.add_selected_conversions(
            report,
            start,
            end,
            self.vendor_entity_granularity(),
            self.vendor_time_granularity(),
        )?;
        Ok(report)
    }

    /// Snapchat: account load first, then both range bounds clamped into the
    /// account timezone. The extra day turns the exclusive end bound into an
    /// inclusive daily one.
    pub fn fetch_snapchat(
        &self,
        reporter: &mut dyn SnapchatReporting,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PulseResult<ReportFrame> {
        reporter.load_ad_account()?;
        let now = Utc::now();
        let start_date = reporter.clamped_date_in_account_timezone(start, now)?;
        let end_date = reporter.clamped_date_in_account_timezone(end + Duration::days(1), now)?;
        let entity_columns: Vec<String> = SNAPCHAT_ENTITY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        let report = reporter.performance_report(
            self.vendor_time_granularity(),
            self.vendor_entity_granularity(),
            &self.vendor_performance_columns(),
            &entity_columns,
            start_date,
            end_date,
        )?;
        Ok(report)
    }

    /// Search Ads: one distinct endpoint per entity granularity, with the
    /// translated time granularity carried as a request override.
    pub fn fetch_apple_search_ads(
        &self,
        reporter: &dyn SearchAdsReporting,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PulseResult<ReportFrame> {
        let overrides = ReportRequestOverrides {
            granularity: Some(self.vendor_time_granularity().to_string()),
        };
        let report = match self.entity_granularity {
            EntityGranularity::Campaign => reporter.campaigns_report(start, end, &overrides)?,
            EntityGranularity::AdGroup => reporter.adgroups_report(start, end, &overrides)?,
            EntityGranularity::Ad => reporter.keywords_report(start, end, &overrides)?,
        };
        Ok(report)
    }

    /// Channel-specific column cleanup. Consumes the fetched frame and
    /// returns the normalized one; Search Ads reports pass through as-is.
    pub fn process(&self, report: ReportFrame) -> PulseResult<ReportFrame> {
        match self.channel {
            Channel::GoogleAds => normalize::google_ads(report),
            Channel::Snapchat => normalize::snapchat(report),
            Channel::AppleSearchAds => Ok(report),
        }
    }
}
