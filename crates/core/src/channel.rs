//! Channel and granularity vocabulary.
//!
//! All three enums are parsed from raw strings at the configuration and CLI
//! boundary; an unrecognized string fails fast with a typed error. Vendor
//! token translation lives on the fetcher, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PulseError;

/// Supported advertising channels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    AppleSearchAds,
    GoogleAds,
    Snapchat,
}

impl Channel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::AppleSearchAds => "Apple Search Ads",
            Channel::GoogleAds => "Google Ads",
            Channel::Snapchat => "Snapchat",
        }
    }

    /// Identifier used at the configuration and CLI boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::AppleSearchAds => "apple_search_ads",
            Channel::GoogleAds => "google_ads",
            Channel::Snapchat => "snapchat",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apple_search_ads" => Ok(Channel::AppleSearchAds),
            "google_ads" => Ok(Channel::GoogleAds),
            "snapchat" => Ok(Channel::Snapchat),
            other => Err(PulseError::UnknownChannel(other.to_string())),
        }
    }
}

/// Time bucketing of a performance report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeGranularity {
    Hourly,
    Daily,
}

impl TimeGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeGranularity::Hourly => "hourly",
            TimeGranularity::Daily => "daily",
        }
    }
}

impl fmt::Display for TimeGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeGranularity {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(TimeGranularity::Hourly),
            "daily" => Ok(TimeGranularity::Daily),
            other => Err(PulseError::UnknownTimeGranularity(other.to_string())),
        }
    }
}

/// Entity level at which a performance report is aggregated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityGranularity {
    Campaign,
    AdGroup,
    Ad,
}

impl EntityGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityGranularity::Campaign => "campaign",
            EntityGranularity::AdGroup => "adgroup",
            EntityGranularity::Ad => "ad",
        }
    }
}

impl fmt::Display for EntityGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityGranularity {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "campaign" => Ok(EntityGranularity::Campaign),
            "adgroup" => Ok(EntityGranularity::AdGroup),
            "ad" => Ok(EntityGranularity::Ad),
            other => Err(PulseError::UnknownEntityGranularity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_round_trip() {
        for channel in [Channel::AppleSearchAds, Channel::GoogleAds, Channel::Snapchat] {
            assert_eq!(channel.as_str().parse::<Channel>().unwrap(), channel);
        }
    }

    #[test]
    fn test_unknown_strings_are_rejected() {
        assert!(matches!(
            "tiktok".parse::<Channel>(),
            Err(PulseError::UnknownChannel(s)) if s == "tiktok"
        ));
        assert!(matches!(
            "weekly".parse::<TimeGranularity>(),
            Err(PulseError::UnknownTimeGranularity(s)) if s == "weekly"
        ));
        assert!(matches!(
            "keyword".parse::<EntityGranularity>(),
            Err(PulseError::UnknownEntityGranularity(s)) if s == "keyword"
        ));
    }

    #[test]
    fn test_granularity_tokens() {
        assert_eq!("hourly".parse::<TimeGranularity>().unwrap(), TimeGranularity::Hourly);
        assert_eq!("adgroup".parse::<EntityGranularity>().unwrap(), EntityGranularity::AdGroup);
        assert_eq!(EntityGranularity::Ad.to_string(), "ad");
    }
}
