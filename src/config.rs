use crate::error::Error;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const SODAHEAD_BASE_URL: &str = "SODAHEAD_BASE_URL";
pub const SODAHEAD_TOKEN: &str = "SODAHEAD_TOKEN";
pub const SODAHEAD_TIMEOUT_SECS: &str = "SODAHEAD_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
    pub sodahead_base_url: String,
    pub sodahead_token: String,
    pub sodahead_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| Error::BusinessError(format!("environment variable {} not been set", key)));
        Ok(Self {
            database_url: required(DATABASE_URL)?,
            bind_address: lookup(BIND_ADDRESS).unwrap_or_else(|| "0.0.0.0:8000".into()),
            max_connections: lookup(DATABASE_MAX_CONNECTIONS).map(|v| v.parse::<u32>()).transpose()?.unwrap_or(5),
            sodahead_base_url: required(SODAHEAD_BASE_URL)?.trim_end_matches('/').to_owned(),
            sodahead_token: required(SODAHEAD_TOKEN)?,
            sodahead_timeout_secs: lookup(SODAHEAD_TIMEOUT_SECS).map(|v| v.parse::<u64>()).transpose()?.unwrap_or(30),
        })
    }
}
