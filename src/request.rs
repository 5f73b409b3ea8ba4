use serde::Deserialize;

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct PollListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub closed: bool,
}
