use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use crate::core::models::remote::{RemoteAnswer, RemotePoll, RemotePollEnvelope};
use crate::core::payload::Payload;
use crate::core::ports::poll_service::PollService;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Update(String),
    Delete(String),
    Fetch(String),
}

#[derive(Default)]
struct State {
    failures: VecDeque<u16>,
    polls: BTreeMap<String, Payload>,
    votes: HashMap<String, Vec<i64>>,
    calls: Vec<Call>,
    seq: u32,
}

#[derive(Default)]
pub struct FakePollService {
    state: Mutex<State>,
}

impl FakePollService {
    pub fn fail_next(&self, status: u16) {
        self.state.lock().unwrap().failures.push_back(status);
    }

    pub fn remote(&self, external_id: &str) -> Option<Payload> {
        self.state.lock().unwrap().polls.get(external_id).cloned()
    }

    pub fn set_votes(&self, external_id: &str, votes: Vec<i64>) {
        self.state.lock().unwrap().votes.insert(external_id.to_owned(), votes);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(status) => Error::from_provider_status(status, format!("provider answered {}", status)).map_or(Ok(()), Err),
            None => Ok(()),
        }
    }
}

impl PollService for FakePollService {
    async fn create(&self, payload: Payload) -> Result<String, Error> {
        self.record(Call::Create)?;
        let mut state = self.state.lock().unwrap();
        state.seq += 1;
        let id = (1000 + state.seq).to_string();
        state.polls.insert(id.clone(), payload.with_access_token("token"));
        Ok(id)
    }

    async fn update(&self, external_id: &str, payload: Payload) -> Result<(), Error> {
        self.record(Call::Update(external_id.to_owned()))?;
        let mut state = self.state.lock().unwrap();
        if !state.polls.contains_key(external_id) {
            return Err(Error::RequestRejected(format!("no poll {}", external_id)));
        }
        state.polls.insert(external_id.to_owned(), payload.with_access_token("token"));
        Ok(())
    }

    async fn delete(&self, external_id: &str) -> Result<(), Error> {
        self.record(Call::Delete(external_id.to_owned()))?;
        self.state.lock().unwrap().polls.remove(external_id);
        Ok(())
    }

    async fn fetch(&self, external_id: &str) -> Result<RemotePollEnvelope, Error> {
        self.record(Call::Fetch(external_id.to_owned()))?;
        let state = self.state.lock().unwrap();
        let payload = state.polls.get(external_id).ok_or_else(|| Error::RequestRejected(format!("no poll {}", external_id)))?;
        let votes = state.votes.get(external_id).cloned().unwrap_or_default();
        let answers: Vec<RemoteAnswer> = payload
            .answers()
            .into_iter()
            .enumerate()
            .map(|(i, (slot, title))| RemoteAnswer {
                id: Some(format!("{}-{}", external_id, slot.index())),
                title: title.to_owned(),
                total_votes: votes.get(i).copied().unwrap_or(0),
            })
            .collect();
        Ok(RemotePollEnvelope {
            poll: RemotePoll {
                id: Some(external_id.to_owned()),
                total_votes: answers.iter().map(|a| a.total_votes).sum(),
                answers,
            },
        })
    }
}
