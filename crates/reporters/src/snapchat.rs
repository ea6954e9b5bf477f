//! Snapchat Marketing API reporting client.
//!
//! Snapchat reports are scoped to an ad account and bucketed in the
//! account's reporting timezone, so the account must be loaded before any
//! report call. Spend metrics arrive in micros.

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use pulse_core::credentials::SnapchatCredentials;
use pulse_core::frame::ReportFrame;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reporting surface of the Snapchat collaborators.
pub trait SnapchatReporting {
    /// Load the ad account tied to the configured account id. Required
    /// before clamping dates or requesting reports.
    fn load_ad_account(&mut self) -> Result<()>;

    /// Clamp `date` to `now` and move it into the account's reporting
    /// timezone, truncated to the start of the local day.
    fn clamped_date_in_account_timezone(
        &self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<FixedOffset>>;

    /// Fetch the performance report between two account-local day bounds.
    #[allow(clippy::too_many_arguments)]
    fn performance_report(
        &self,
        time_granularity: &str,
        entity_granularity: &str,
        columns: &[String],
        entity_columns: &[String],
        start_date: DateTime<FixedOffset>,
        end_date: DateTime<FixedOffset>,
    ) -> Result<ReportFrame>;
}

/// Ad account metadata returned by the account endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: String,
    pub name: String,
    /// UTC offset of the account's reporting timezone, in hours.
    pub timezone_offset_hours: i32,
    pub currency: String,
}

impl AdAccount {
    fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.timezone_offset_hours * 3600)
            .ok_or_else(|| anyhow!("invalid account timezone offset: {}", self.timezone_offset_hours))
    }

    /// Clamp `date` to `now`, then truncate to the start of the day in the
    /// account's reporting timezone.
    pub fn clamp_to_local_day(
        &self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<FixedOffset>> {
        let offset = self.utc_offset()?;
        let local_day = date.min(now).with_timezone(&offset).date_naive();
        offset
            .from_local_datetime(&local_day.and_time(NaiveTime::MIN))
            .single()
            .ok_or_else(|| anyhow!("no unambiguous day start for {local_day}"))
    }
}

/// Authenticated Snapchat Marketing API session.
pub struct SnapchatApi {
    credentials: SnapchatCredentials,
    ad_account: Option<AdAccount>,
}

impl SnapchatApi {
    pub fn new(credentials: SnapchatCredentials) -> Self {
        // In production: OAuth refresh-token exchange against the Snapchat
        // Marketing API.
        Self {
            credentials,
            ad_account: None,
        }
    }

    /// Fetch the configured ad account's metadata.
    pub fn load_ad_account(&mut self) -> Result<()> {
        debug!(
            ad_account_id = %self.credentials.ad_account_id,
            "Loading Snapchat ad account"
        );
        // In production: GET /adaccounts/{id}; the response carries the
        // account's reporting timezone and currency.
        self.ad_account = Some(AdAccount {
            id: self.credentials.ad_account_id.clone(),
            name: String::new(),
            timezone_offset_hours: 0,
            currency: "USD".to_string(),
        });
        Ok(())
    }

    pub fn ad_account(&self) -> Result<&AdAccount> {
        match &self.ad_account {
            Some(account) => Ok(account),
            None => bail!("ad account not loaded; call load_ad_account before reporting"),
        }
    }
}

pub struct SnapchatReporter {
    api: SnapchatApi,
}

impl SnapchatReporter {
    pub fn new(api: SnapchatApi) -> Self {
        Self { api }
    }
}

impl SnapchatReporting for SnapchatReporter {
    fn load_ad_account(&mut self) -> Result<()> {
        self.api.load_ad_account()
    }

    fn clamped_date_in_account_timezone(
        &self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<FixedOffset>> {
        self.api.ad_account()?.clamp_to_local_day(date, now)
    }

    fn performance_report(
        &self,
        time_granularity: &str,
        entity_granularity: &str,
        columns: &[String],
        entity_columns: &[String],
        start_date: DateTime<FixedOffset>,
        end_date: DateTime<FixedOffset>,
    ) -> Result<ReportFrame> {
        let account = self.api.ad_account()?;
        debug!(
            ad_account_id = %account.id,
            time_granularity,
            entity_granularity,
            start = %start_date,
            end = %end_date,
            "Requesting Snapchat performance report"
        );

        // In production: GET /adaccounts/{id}/stats with the entity
        // breakdown and granularity, flattened into rows.
        let mut report_columns: Vec<String> = entity_columns.to_vec();
        report_columns.extend(columns.iter().cloned());
        Ok(ReportFrame::new(report_columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(offset_hours: i32) -> AdAccount {
        AdAccount {
            id: "acct-1".into(),
            name: "Test Account".into(),
            timezone_offset_hours: offset_hours,
            currency: "USD".into(),
        }
    }

    fn api() -> SnapchatApi {
        SnapchatApi::new(SnapchatCredentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            refresh_token: "token".into(),
            ad_account_id: "acct-1".into(),
        })
    }

    #[test]
    fn test_past_date_truncates_to_local_day() {
        let date = Utc.with_ymd_and_hms(2023, 5, 10, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2023, 5, 20, 0, 0, 0).unwrap();
        let clamped = account(-8).clamp_to_local_day(date, now).unwrap();
        assert_eq!(clamped.to_rfc3339(), "2023-05-10T00:00:00-08:00");
    }

    #[test]
    fn test_offset_can_shift_the_local_day() {
        // 01:00 UTC is still the previous day at UTC-8.
        let date = Utc.with_ymd_and_hms(2023, 5, 10, 1, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2023, 5, 20, 0, 0, 0).unwrap();
        let clamped = account(-8).clamp_to_local_day(date, now).unwrap();
        assert_eq!(clamped.to_rfc3339(), "2023-05-09T00:00:00-08:00");
    }

    #[test]
    fn test_future_date_clamps_to_now() {
        let date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2023, 5, 20, 15, 30, 0).unwrap();
        let clamped = account(0).clamp_to_local_day(date, now).unwrap();
        assert_eq!(clamped.to_rfc3339(), "2023-05-20T00:00:00+00:00");
    }

    #[test]
    fn test_reporting_requires_loaded_account() {
        let reporter = SnapchatReporter::new(api());
        let date = Utc.with_ymd_and_hms(2023, 5, 10, 0, 0, 0).unwrap();
        assert!(reporter
            .clamped_date_in_account_timezone(date, date)
            .is_err());

        let mut reporter = reporter;
        reporter.load_ad_account().unwrap();
        assert!(reporter
            .clamped_date_in_account_timezone(date, date)
            .is_ok());
    }

    #[test]
    fn test_report_columns_follow_request() {
        let mut reporter = SnapchatReporter::new(api());
        reporter.load_ad_account().unwrap();
        let start = account(0)
            .clamp_to_local_day(
                Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2023, 5, 20, 0, 0, 0).unwrap(),
            )
            .unwrap();
        let report = reporter
            .performance_report(
                "DAY",
                "adsquad",
                &["impressions".into(), "swipes".into(), "spend".into()],
                &["id".into(), "name".into()],
                start,
                start,
            )
            .unwrap();
        assert_eq!(
            report.columns(),
            ["id", "name", "impressions", "swipes", "spend"]
        );
    }
}
