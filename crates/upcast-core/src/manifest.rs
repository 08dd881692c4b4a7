use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::platform::PlatformKey;

/// Update payload for a single platform. Empty strings mean "not found yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub signature: String,
    pub url: String,
}

impl PlatformEntry {
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// The JSON document consumed by the auto-update client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub notes: String,
    #[serde(serialize_with = "serialize_pub_date", deserialize_with = "deserialize_pub_date")]
    pub pub_date: DateTime<Utc>,
    pub platforms: BTreeMap<PlatformKey, PlatformEntry>,
}

impl Manifest {
    /// Creates a manifest with every known platform key present and empty.
    pub fn empty(name: impl Into<String>, notes: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
            pub_date,
            platforms: PlatformKey::ALL
                .into_iter()
                .map(|key| (key, PlatformEntry::default()))
                .collect(),
        }
    }

    #[must_use]
    pub fn entry(&self, key: PlatformKey) -> Option<&PlatformEntry> {
        self.platforms.get(&key)
    }

    /// Renders the manifest as 2-space indented JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

}

fn serialize_pub_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_pub_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
