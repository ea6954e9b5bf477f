use serde::Deserialize;

use crate::channel::Channel;
use crate::credentials::{
    ChannelCredentials, GoogleAdsCredentials, SearchAdsCredentials, SnapchatCredentials,
};
use crate::error::{PulseError, PulseResult};

/// Root application configuration. Loaded from environment variables
/// with the prefix `CHANNEL_PULSE__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchDefaults,
    #[serde(default)]
    pub google_ads: Option<GoogleAdsCredentials>,
    #[serde(default)]
    pub snapchat: Option<SnapchatCredentials>,
    #[serde(default)]
    pub apple_search_ads: Option<SearchAdsCredentials>,
}

/// Fetch parameters used when the CLI does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchDefaults {
    #[serde(default = "default_time_granularity")]
    pub time_granularity: String,
    #[serde(default = "default_entity_granularity")]
    pub entity_granularity: String,
    #[serde(default)]
    pub performance_columns: Vec<String>,
}

fn default_time_granularity() -> String {
    "daily".to_string()
}
fn default_entity_granularity() -> String {
    "campaign".to_string()
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            time_granularity: default_time_granularity(),
            entity_granularity: default_entity_granularity(),
            performance_columns: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CHANNEL_PULSE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Credentials for the requested channel, if configured.
    pub fn credentials_for(&self, channel: Channel) -> PulseResult<ChannelCredentials> {
        let credentials = match channel {
            Channel::GoogleAds => self.google_ads.clone().map(ChannelCredentials::GoogleAds),
            Channel::Snapchat => self.snapchat.clone().map(ChannelCredentials::Snapchat),
            Channel::AppleSearchAds => self
                .apple_search_ads
                .clone()
                .map(ChannelCredentials::AppleSearchAds),
        };
        credentials.ok_or(PulseError::MissingCredentials(channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let defaults = FetchDefaults::default();
        assert_eq!(defaults.time_granularity, "daily");
        assert_eq!(defaults.entity_granularity, "campaign");
        assert!(defaults.performance_columns.is_empty());
    }

    #[test]
    fn test_credentials_for_unconfigured_channel() {
        let config = AppConfig::default();
        let err = config.credentials_for(Channel::Snapchat).unwrap_err();
        assert!(matches!(err, PulseError::MissingCredentials(Channel::Snapchat)));
    }

    #[test]
    fn test_credentials_for_configured_channel() {
        let config = AppConfig {
            snapchat: Some(SnapchatCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
                refresh_token: "token".into(),
                ad_account_id: "acct-1".into(),
            }),
            ..AppConfig::default()
        };
        let creds = config.credentials_for(Channel::Snapchat).unwrap();
        assert_eq!(creds.channel(), Channel::Snapchat);
    }
}
