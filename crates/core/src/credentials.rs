//! Per-channel credential shapes.
//!
//! Each channel authenticates differently, so the credential fields are
//! typed per channel instead of passed as an open string map.

use serde::Deserialize;

use crate::channel::Channel;

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleAdsCredentials {
    pub developer_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub customer_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapchatCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub ad_account_id: String,
}

/// Certificate bundle for the Apple Search Ads API.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchAdsCredentials {
    pub org_id: String,
    pub key_id: String,
    pub certificate_pem: String,
    pub private_key_pem: String,
}

/// Credentials for exactly one channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelCredentials {
    AppleSearchAds(SearchAdsCredentials),
    GoogleAds(GoogleAdsCredentials),
    Snapchat(SnapchatCredentials),
}

impl ChannelCredentials {
    /// The channel these credentials authenticate.
    pub fn channel(&self) -> Channel {
        match self {
            ChannelCredentials::AppleSearchAds(_) => Channel::AppleSearchAds,
            ChannelCredentials::GoogleAds(_) => Channel::GoogleAds,
            ChannelCredentials::Snapchat(_) => Channel::Snapchat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_report_their_channel() {
        let creds = ChannelCredentials::Snapchat(SnapchatCredentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            refresh_token: "token".into(),
            ad_account_id: "acct-1".into(),
        });
        assert_eq!(creds.channel(), Channel::Snapchat);
    }
}
