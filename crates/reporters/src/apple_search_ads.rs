//! Apple Search Ads reporting client.
//!
//! Search Ads exposes one report endpoint per entity level rather than a
//! single parameterized call, and takes request-level overrides for the
//! time granularity. Authentication uses a certificate bundle.

use anyhow::Result;
use chrono::{DateTime, Utc};
use pulse_core::credentials::SearchAdsCredentials;
use pulse_core::frame::ReportFrame;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request-level overrides applied to a report request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequestOverrides {
    /// Vendor time-granularity token, e.g. "DAILY".
    pub granularity: Option<String>,
}

/// Reporting surface of the Search Ads collaborators. Campaigns, ad groups,
/// and keywords are distinct endpoints on the vendor side.
pub trait SearchAdsReporting {
    fn campaigns_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame>;

    fn adgroups_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame>;

    fn keywords_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame>;
}

/// Certificate-authenticated Search Ads API session.
pub struct SearchAdsApi {
    credentials: SearchAdsCredentials,
}

impl SearchAdsApi {
    pub fn new(credentials: SearchAdsCredentials) -> Self {
        // In production: mutual-TLS session against the Search Ads API
        // built from the certificate and private key pair.
        Self { credentials }
    }

    pub fn org_id(&self) -> &str {
        &self.credentials.org_id
    }
}

pub struct SearchAdsReporter {
    api: SearchAdsApi,
}

impl SearchAdsReporter {
    pub fn new(api: SearchAdsApi) -> Self {
        Self { api }
    }

    fn report(
        &self,
        endpoint: &str,
        entity_columns: [&str; 2],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame> {
        debug!(
            org_id = self.api.org_id(),
            endpoint,
            granularity = overrides.granularity.as_deref().unwrap_or("default"),
            start = %start,
            end = %end,
            "Requesting Search Ads report"
        );

        // In production: POST /reports/{endpoint} with the override block
        // merged into the selector payload.
        let mut columns: Vec<String> = entity_columns.iter().map(|c| c.to_string()).collect();
        for metric in ["date", "impressions", "taps", "localSpend"] {
            columns.push(metric.to_string());
        }
        Ok(ReportFrame::new(columns))
    }
}

impl SearchAdsReporting for SearchAdsReporter {
    fn campaigns_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame> {
        self.report("campaigns", ["campaignId", "campaignName"], start, end, overrides)
    }

    fn adgroups_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame> {
        self.report("adgroups", ["adGroupId", "adGroupName"], start, end, overrides)
    }

    fn keywords_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        overrides: &ReportRequestOverrides,
    ) -> Result<ReportFrame> {
        self.report("keywords", ["keywordId", "keywordText"], start, end, overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reporter() -> SearchAdsReporter {
        SearchAdsReporter::new(SearchAdsApi::new(SearchAdsCredentials {
            org_id: "org-1".into(),
            key_id: "key-1".into(),
            certificate_pem: "cert".into(),
            private_key_pem: "key".into(),
        }))
    }

    #[test]
    fn test_endpoints_carry_their_entity_columns() {
        let start = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 5, 8, 0, 0, 0).unwrap();
        let overrides = ReportRequestOverrides {
            granularity: Some("DAILY".into()),
        };

        let campaigns = reporter().campaigns_report(start, end, &overrides).unwrap();
        assert!(campaigns.has_column("campaignId"));

        let adgroups = reporter().adgroups_report(start, end, &overrides).unwrap();
        assert!(adgroups.has_column("adGroupId"));

        let keywords = reporter().keywords_report(start, end, &overrides).unwrap();
        assert!(keywords.has_column("keywordText"));
        assert!(keywords.has_column("localSpend"));
    }
}
