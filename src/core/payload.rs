use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::models::{answer::Answer, poll::Poll, slot::SlotId};

pub const DATE_FORMAT: &str = "%m/%d/%y %I:%M %p";
pub const BLANK_ANSWER: &str = "Intentionally blank";
pub const DEFAULT_ANSWER_1: &str = "default answer 1";
pub const DEFAULT_ANSWER_2: &str = "default answer 2";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    pub fn for_poll(poll: &Poll, answers: &[Answer]) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_owned(), poll.title.clone());
        fields.insert("title".to_owned(), poll.question_text.clone());
        if poll.is_synced() {
            fields.insert("id".to_owned(), poll.external_id.clone());
        }
        if let Some(published_at) = poll.published_at {
            fields.insert("activationDate".to_owned(), format_date(published_at));
        }
        if let Some(end_date) = poll.end_date {
            fields.insert("endDate".to_owned(), format_date(end_date));
        }
        for answer in answers {
            let text = if answer.text.is_empty() { BLANK_ANSWER } else { answer.text.as_str() };
            fields.insert(answer.external_slot_id.clone(), text.to_owned());
        }
        fields.entry(SlotId::new(1).to_string()).or_insert_with(|| DEFAULT_ANSWER_1.to_owned());
        fields.entry(SlotId::new(2).to_string()).or_insert_with(|| DEFAULT_ANSWER_2.to_owned());
        Self(fields)
    }

    pub fn with_access_token(mut self, token: &str) -> Self {
        self.0.insert("access_token".to_owned(), token.to_owned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn answers(&self) -> Vec<(SlotId, &str)> {
        let mut answers: Vec<(SlotId, &str)> = self.0.iter().filter_map(|(k, v)| k.parse::<SlotId>().ok().map(|s| (s, v.as_str()))).collect();
        answers.sort_by_key(|(s, _)| *s);
        answers
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}
