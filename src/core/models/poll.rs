use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::answer::Answer;

pub const DEFAULT_ANSWER_TYPE: &str = "text";

fn default_answer_type() -> String {
    DEFAULT_ANSWER_TYPE.into()
}

// a present key, even `null`, deserializes to Some
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Poll {
    pub id: i32,
    pub title: String,
    pub question_text: String,
    pub external_id: String,
    pub last_answer_index: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub answer_type: String,
}

impl Poll {
    pub fn is_synced(&self) -> bool {
        !self.external_id.is_empty()
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.published_at.map(|p| p <= now).unwrap_or(false)
    }

    pub fn is_closed(&self, now: DateTime<Utc>) -> bool {
        self.end_date.map(|e| e <= now).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollCreate {
    pub title: String,
    #[serde(default)]
    pub question_text: String,
    pub published_at: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_answer_type")]
    pub answer_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollUpdate {
    pub title: Option<String>,
    pub question_text: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub published_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub answer_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub title: String,
    pub question_text: String,
    pub published_at: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub answer_type: String,
}

impl From<PollCreate> for Insert {
    fn from(c: PollCreate) -> Self {
        Self {
            title: c.title,
            question_text: c.question_text,
            published_at: c.published_at,
            end_date: c.end_date,
            answer_type: c.answer_type,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Update {
    pub title: String,
    pub question_text: String,
    pub published_at: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub answer_type: String,
}

impl Update {
    pub fn merge(poll: &Poll, patch: PollUpdate) -> Self {
        Self {
            title: patch.title.unwrap_or_else(|| poll.title.clone()),
            question_text: patch.question_text.unwrap_or_else(|| poll.question_text.clone()),
            published_at: patch.published_at.unwrap_or(poll.published_at),
            end_date: patch.end_date.unwrap_or(poll.end_date),
            answer_type: patch.answer_type.unwrap_or_else(|| poll.answer_type.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Query {
    pub now: DateTime<Utc>,
    pub active: bool,
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollDetail {
    #[serde(flatten)]
    pub poll: Poll,
    pub answers: Vec<Answer>,
}
