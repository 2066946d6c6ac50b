//! Demo inbox used to populate the chat UI.
//!
//! Every message date is `now` minus a fixed offset, computed once when the
//! set is built. The dates do not move afterwards.

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::models::{Avatar, Conversation, Message};

/// A span of time in the past, e.g. "1 hour 7 minutes ago".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeOffset {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl RelativeOffset {
    pub const fn minutes(minutes: i64) -> Self {
        Self { days: 0, hours: 0, minutes }
    }

    pub const fn hours(hours: i64) -> Self {
        Self { days: 0, hours, minutes: 0 }
    }

    pub const fn days(days: i64) -> Self {
        Self { days, hours: 0, minutes: 0 }
    }

    pub const fn and_hours(self, hours: i64) -> Self {
        Self { hours, ..self }
    }

    pub const fn and_minutes(self, minutes: i64) -> Self {
        Self { minutes, ..self }
    }

    pub fn to_duration(self) -> Duration {
        Duration::days(self.days) + Duration::hours(self.hours) + Duration::minutes(self.minutes)
    }
}

/// `now` shifted back by `offset`.
pub fn ago(now: DateTime<Utc>, offset: RelativeOffset) -> DateTime<Utc> {
    now - offset.to_duration()
}

/// Builds the six demo conversations relative to `now`.
///
/// `now` is truncated to milliseconds so the dates survive a trip through
/// their ISO-8601 text form unchanged.
pub fn chat_conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    let now = now.trunc_subsecs(3);
    let msg = |id: u32, offset: RelativeOffset, text: &str, from_me: Option<bool>| Message {
        id,
        text: text.to_string(),
        date: ago(now, offset),
        from_me,
    };

    vec![
        conversation(
            1,
            "Low Ticket Brasil",
            None,
            Some(1),
            vec![
                msg(1, RelativeOffset::minutes(15), "Hi! Is there a way to migrate all my contacts?", None),
                msg(2, RelativeOffset::minutes(13), "Yes, we can help you with that. Do you use CSV exports?", Some(true)),
                msg(3, RelativeOffset::minutes(11), "Great, I do. I will send it now.", None),
            ],
        ),
        conversation(
            2,
            "NodeJS - WhatsApp APIs",
            Some(true),
            None,
            vec![
                msg(1, RelativeOffset::hours(1).and_minutes(7), "Can we deploy this tonight?", None),
                msg(2, RelativeOffset::hours(1).and_minutes(2), "We can, but we need to merge the pending PR first.", Some(true)),
            ],
        ),
        conversation(
            3,
            "Tamyres",
            None,
            None,
            vec![msg(1, RelativeOffset::hours(2).and_minutes(18), "Good afternoon! Did you receive my file?", None)],
        ),
        conversation(
            4,
            "Gracy Araujo",
            None,
            None,
            vec![
                msg(1, RelativeOffset::hours(4).and_minutes(3), "Good morning", None),
                msg(2, RelativeOffset::hours(4).and_minutes(1), "Good morning! How can I help you today?", Some(true)),
            ],
        ),
        conversation(
            5,
            "Eva Fernandes",
            None,
            Some(3),
            vec![msg(1, RelativeOffset::days(1).and_hours(2), "I have been waiting for 33 days 😅", None)],
        ),
        conversation(
            6,
            "Kezia",
            None,
            None,
            vec![msg(1, RelativeOffset::days(2), "No messages yet", None)],
        ),
    ]
}

fn conversation(
    id: u32,
    name: &str,
    is_group: Option<bool>,
    unread_count: Option<u32>,
    messages: Vec<Message>,
) -> Conversation {
    Conversation {
        id,
        name: name.to_string(),
        channel: "Felipe".to_string(),
        is_group,
        unread_count,
        avatar: Avatar {
            src: format!("https://i.pravatar.cc/128?u=chat-{id}"),
        },
        messages,
    }
}
