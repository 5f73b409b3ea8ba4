use log::{debug, warn};
use reqwest::{Client, Response};
use std::time::Duration;

use crate::config::Config;
use crate::core::models::remote::RemotePollEnvelope;
use crate::core::payload::Payload;
use crate::core::ports::poll_service::PollService;
use crate::error::Error;

const USER_AGENT: &str = concat!("bulbs-poll/", env!("CARGO_PKG_VERSION"));

pub struct Sodahead {
    http: Client,
    base_url: String,
    token: String,
}

impl Sodahead {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, Error> {
        let http = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(&config.sodahead_base_url, &config.sodahead_token, Duration::from_secs(config.sodahead_timeout_secs))
    }

    fn polls_endpoint(&self) -> String {
        format!("{}/api/polls/", self.base_url)
    }

    fn poll_endpoint(&self, external_id: &str) -> String {
        format!("{}/api/polls/{}/", self.base_url, external_id)
    }
}

async fn check(response: Response) -> Result<Response, Error> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }
    let url = response.url().to_string();
    let detail = response.text().await.unwrap_or_default();
    warn!("poll provider answered {} for {}: {}", status, url, detail);
    Err(Error::from_provider_status(status, detail).unwrap_or_else(|| Error::InvalidResponse(format!("unexpected status {}", status))))
}

impl PollService for Sodahead {
    async fn create(&self, payload: Payload) -> Result<String, Error> {
        debug!("creating poll {:?} on provider", payload.get("name"));
        let response = self.http.post(self.polls_endpoint()).form(&payload.with_access_token(&self.token)).send().await?;
        let envelope: RemotePollEnvelope = check(response).await?.json().await?;
        envelope.poll.id.ok_or_else(|| Error::InvalidResponse("creation response carries no poll id".into()))
    }

    async fn update(&self, external_id: &str, payload: Payload) -> Result<(), Error> {
        debug!("updating poll {} on provider", external_id);
        let response = self.http.post(self.poll_endpoint(external_id)).form(&payload.with_access_token(&self.token)).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, external_id: &str) -> Result<(), Error> {
        debug!("deleting poll {} on provider", external_id);
        let response = self
            .http
            .delete(self.poll_endpoint(external_id))
            .query(&[("access_token", self.token.as_str())])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn fetch(&self, external_id: &str) -> Result<RemotePollEnvelope, Error> {
        let response = self.http.get(self.poll_endpoint(external_id)).send().await?;
        let envelope = check(response).await?.json().await?;
        Ok(envelope)
    }
}
