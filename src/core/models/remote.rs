use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ids arrive as numbers or strings
fn id_from_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemotePollEnvelope {
    #[serde(default)]
    pub poll: RemotePoll,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePoll {
    #[serde(default, deserialize_with = "id_from_value", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub total_votes: i64,
    #[serde(default)]
    pub answers: Vec<RemoteAnswer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAnswer {
    #[serde(default, deserialize_with = "id_from_value")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub total_votes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergedPoll {
    pub id: i32,
    pub title: String,
    pub question_text: String,
    pub active: bool,
    pub closed: bool,
    pub total_votes: i64,
    pub answers: Vec<MergedAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergedAnswer {
    pub id: i32,
    pub answer_text: String,
    pub external_slot_id: String,
    pub remote_id: Option<String>,
    pub total_votes: i64,
}
