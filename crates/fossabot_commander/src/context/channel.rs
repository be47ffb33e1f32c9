use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// The channel the custom api was invoked in.
///
/// Equality compares timestamps as instants, so two channels whose times only
/// differ in offset are equal even though their snapshots are not. Compare
/// [`DataModel::fields`](super::DataModel::fields) when the offset matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    id: String,
    login: String,
    display_name: String,
    #[serde(rename(deserialize = "avatar"), alias = "avatar_url")]
    avatar_url: String,
    slug: String,
    broadcaster_type: String,
    provider: String,
    provider_id: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<FixedOffset>,
    #[serde(with = "timestamp")]
    stream_timestamp: DateTime<FixedOffset>,
    is_live: bool,
}

impl Channel {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lowercase login name
    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Fossabot's slug for the channel
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// e.g. `affiliate` or `partner`
    pub fn broadcaster_type(&self) -> &str {
        &self.broadcaster_type
    }

    /// The streaming platform, e.g. `twitch`
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The channel's id on the streaming platform
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub const fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub const fn stream_timestamp(&self) -> DateTime<FixedOffset> {
        self.stream_timestamp
    }

    pub const fn is_live(&self) -> bool {
        self.is_live
    }
}

data_model! {
    Channel => "channel",
}
