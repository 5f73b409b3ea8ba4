use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::slot::SlotId;
use crate::error::Error;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Answer {
    pub id: i32,
    pub poll_id: i32,
    pub external_slot_id: String,
    pub text: String,
}

impl Answer {
    pub fn slot(&self) -> Result<SlotId, Error> {
        self.external_slot_id.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerCreate {
    #[serde(alias = "poll")]
    pub poll_id: i32,
    #[serde(default, alias = "answer_text")]
    pub text: String,
    #[serde(default)]
    pub external_slot_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerUpdate {
    #[serde(alias = "answer_text")]
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub poll_id: i32,
    pub external_slot_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub poll_id_eq: Option<i32>,
}
