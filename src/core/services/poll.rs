use chrono::Utc;
use log::{info, warn};

use crate::core::models::{
    answer::{Answer, Query as AnswerQuery},
    common::Pagination,
    poll::{Insert as PollInsert, Poll, PollCreate, PollDetail, PollUpdate, Query as PollQuery, Update as DBPollUpdate},
    remote::{MergedAnswer, MergedPoll, RemotePollEnvelope},
};
use crate::core::payload::Payload;
use crate::core::ports::{
    poll_service::PollService,
    repository::{AnswerCommon, Manager, PollCommon, Store, TxStore},
};
use crate::error::Error;

async fn answers_of<S>(db: &mut S, poll_id: i32) -> Result<Vec<Answer>, Error>
where
    S: Store,
{
    let mut answers = AnswerCommon::query(db, &AnswerQuery { poll_id_eq: Some(poll_id) }).await?;
    answers.sort_by_key(|a| (a.slot().ok(), a.id));
    Ok(answers)
}

pub async fn sync<S, P>(db: &mut S, service: &P, id: i32) -> Result<Poll, Error>
where
    S: Store,
    P: PollService,
{
    let mut poll = PollCommon::get(db, id).await?;
    let answers = answers_of(db, id).await?;
    let payload = Payload::for_poll(&poll, &answers);
    if poll.is_synced() {
        let count = payload.answers().len();
        service.update(&poll.external_id, payload).await?;
        info!("poll {} pushed to provider as {} with {} answer slots", poll.id, poll.external_id, count);
    } else {
        let external_id = service.create(payload).await?;
        PollCommon::set_external_id(db, id, &external_id).await?;
        info!("poll {} created on provider as {}", poll.id, external_id);
        poll.external_id = external_id;
    }
    Ok(poll)
}

pub async fn create<M, P>(manager: &M, service: &P, data: PollCreate) -> Result<Poll, Error>
where
    M: Manager,
    P: PollService,
{
    let mut tx = manager.tx().await?;
    let id = PollCommon::insert(&mut tx, PollInsert::from(data)).await?;
    tx.commit().await?;
    let mut db = manager.db().await?;
    sync(&mut db, service, id).await.map_err(|e| {
        let kind = if e.is_transient() { "provider unavailable" } else { "provider refused" };
        warn!("poll {} stored but not created on provider, {}: {}", id, kind, e);
        e
    })
}

pub async fn update<M, P>(manager: &M, service: &P, id: i32, data: PollUpdate) -> Result<Poll, Error>
where
    M: Manager,
    P: PollService,
{
    let mut tx = manager.tx().await?;
    let poll = PollCommon::get_for_update(&mut tx, id).await?;
    PollCommon::update(&mut tx, id, DBPollUpdate::merge(&poll, data)).await?;
    tx.commit().await?;
    let mut db = manager.db().await?;
    sync(&mut db, service, id).await
}

pub async fn delete<M, P>(manager: &M, service: &P, id: i32) -> Result<(), Error>
where
    M: Manager,
    P: PollService,
{
    let poll = PollCommon::get(&mut manager.db().await?, id).await?;
    if poll.is_synced() {
        service.delete(&poll.external_id).await?;
    }
    let mut tx = manager.tx().await?;
    PollCommon::delete(&mut tx, id).await?;
    tx.commit().await?;
    info!("poll {} deleted", id);
    Ok(())
}

pub async fn get<S>(db: &mut S, id: i32) -> Result<PollDetail, Error>
where
    S: Store,
{
    let poll = PollCommon::get(db, id).await?;
    let answers = answers_of(db, id).await?;
    Ok(PollDetail { poll, answers })
}

pub async fn list<S>(db: &mut S, active: bool, closed: bool, pagination: Pagination) -> Result<(Vec<Poll>, i64), Error>
where
    S: Store,
{
    let query = PollQuery { now: Utc::now(), active, closed };
    let total = PollCommon::count(db, &query).await?;
    let polls = PollCommon::query(db, &query, Some(pagination)).await?;
    Ok((polls, total))
}

// provider failures degrade to zero votes
pub async fn merged<S, P>(db: &mut S, service: &P, id: i32) -> Result<MergedPoll, Error>
where
    S: Store,
    P: PollService,
{
    let PollDetail { poll, answers } = get(db, id).await?;
    let now = Utc::now();
    let (active, closed) = (poll.is_active(now), poll.is_closed(now));
    let remote = if poll.is_synced() {
        service.fetch(&poll.external_id).await.unwrap_or_else(|e| {
            warn!("poll {} read from provider failed, serving zero votes: {}", poll.id, e);
            RemotePollEnvelope::default()
        })
    } else {
        RemotePollEnvelope::default()
    };
    let answers = answers
        .into_iter()
        .map(|a| {
            // the provider lists answers in slot order, including retired slots
            let r = a.slot().ok().and_then(|s| remote.poll.answers.get(s.index() as usize - 1));
            MergedAnswer {
                id: a.id,
                remote_id: r.and_then(|r| r.id.clone()),
                total_votes: r.map(|r| r.total_votes).unwrap_or(0),
                answer_text: a.text,
                external_slot_id: a.external_slot_id,
            }
        })
        .collect();
    Ok(MergedPoll {
        id: poll.id,
        title: poll.title,
        question_text: poll.question_text,
        active,
        closed,
        total_votes: remote.poll.total_votes,
        answers,
    })
}
