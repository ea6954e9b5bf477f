//! Per-channel reporting collaborators.
//!
//! Each channel exposes an API client built from typed credentials and a
//! reporter that turns vendor responses into a `ReportFrame`. Vendor HTTP,
//! auth token exchange, pagination, and retries all live behind these seams;
//! callers only see the reporting traits.

pub mod apple_search_ads;
pub mod google_ads;
pub mod snapchat;

pub use apple_search_ads::{
    ReportRequestOverrides, SearchAdsApi, SearchAdsReporter, SearchAdsReporting,
};
pub use google_ads::{GoogleAdsApi, GoogleAdsReporter, GoogleAdsReporting};
pub use snapchat::{AdAccount, SnapchatApi, SnapchatReporter, SnapchatReporting};
