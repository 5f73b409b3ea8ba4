use crate::core::models::remote::RemotePollEnvelope;
use crate::core::payload::Payload;
use crate::error::Error;

pub trait PollService {
    async fn create(&self, payload: Payload) -> Result<String, Error>;
    async fn update(&self, external_id: &str, payload: Payload) -> Result<(), Error>;
    async fn delete(&self, external_id: &str) -> Result<(), Error>;
    async fn fetch(&self, external_id: &str) -> Result<RemotePollEnvelope, Error>;
}
