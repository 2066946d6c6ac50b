use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat thread shown in the inbox list.
///
/// Optional flags stay `None` when the source data omits them, so they are
/// also omitted on the wire. Use the accessors to read them with their
/// defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u32,
    pub name: String,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u32>,
    pub avatar: Avatar,
    /// Oldest first.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Absent means a one-on-one chat.
    pub fn is_group(&self) -> bool {
        self.is_group.unwrap_or(false)
    }

    /// Absent means nothing unread.
    pub fn unread_count(&self) -> u32 {
        self.unread_count.unwrap_or(0)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique within the parent conversation only.
    pub id: u32,
    pub text: String,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_me: Option<bool>,
}

impl Message {
    /// Absent means the counterparty sent it.
    pub fn is_from_me(&self) -> bool {
        self.from_me.unwrap_or(false)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-19T09:45:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
