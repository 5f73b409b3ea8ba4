use log::{debug, info};

use crate::core::models::{
    answer::{Answer, AnswerCreate, AnswerUpdate, Insert as AnswerInsert, Query as AnswerQuery},
    slot::SlotId,
};
use crate::core::ports::{
    poll_service::PollService,
    repository::{AnswerCommon, Manager, PollCommon, Store, TxStore},
};
use crate::core::services::poll;
use crate::error::Error;

// bumps the poll counter in `store`; insert and commit the answer in the same transaction
pub async fn allocate_slot<T>(store: &mut T, answer: &mut AnswerInsert) -> Result<SlotId, Error>
where
    T: TxStore,
{
    if !answer.external_slot_id.is_empty() {
        return Err(Error::SlotAlreadyAssigned(answer.external_slot_id.clone()));
    }
    let p = PollCommon::get_for_update(store, answer.poll_id).await?;
    let slot = SlotId::after(p.last_answer_index);
    PollCommon::set_last_answer_index(store, p.id, slot.index() as i32).await?;
    answer.external_slot_id = slot.to_string();
    debug!("poll {} handed out {}", p.id, slot);
    Ok(slot)
}

// Keeps the counter ahead of slots that were issued elsewhere.
async fn claim_slot<T>(store: &mut T, answer: &mut AnswerInsert, slot: SlotId) -> Result<(), Error>
where
    T: TxStore,
{
    let p = PollCommon::get_for_update(store, answer.poll_id).await?;
    let taken = AnswerCommon::query(store, &AnswerQuery { poll_id_eq: Some(p.id) })
        .await?
        .iter()
        .any(|a| a.slot().ok() == Some(slot));
    if taken {
        return Err(Error::BusinessError(format!("{} is already used by poll {}", slot, p.id)));
    }
    if slot.index() as i32 > p.last_answer_index {
        PollCommon::set_last_answer_index(store, p.id, slot.index() as i32).await?;
    }
    answer.external_slot_id = slot.to_string();
    Ok(())
}

pub async fn create<T>(mut store: T, create: AnswerCreate) -> Result<Answer, Error>
where
    T: TxStore,
{
    let mut insert = AnswerInsert {
        poll_id: create.poll_id,
        external_slot_id: String::new(),
        text: create.text,
    };
    match create.external_slot_id.filter(|s| !s.is_empty()) {
        Some(slot) => claim_slot(&mut store, &mut insert, slot.parse()?).await?,
        None => {
            allocate_slot(&mut store, &mut insert).await?;
        }
    }
    let id = AnswerCommon::insert(&mut store, insert.clone()).await?;
    store.commit().await?;
    info!("answer {} created for poll {} as {}", id, insert.poll_id, insert.external_slot_id);
    Ok(Answer {
        id,
        poll_id: insert.poll_id,
        external_slot_id: insert.external_slot_id,
        text: insert.text,
    })
}

pub async fn get<S>(db: &mut S, id: i32) -> Result<Answer, Error>
where
    S: Store,
{
    AnswerCommon::get(db, id).await
}

pub async fn update<T>(mut store: T, id: i32, update: AnswerUpdate) -> Result<Answer, Error>
where
    T: TxStore,
{
    let mut answer = AnswerCommon::get(&mut store, id).await?;
    AnswerCommon::update_text(&mut store, id, &update.text).await?;
    store.commit().await?;
    answer.text = update.text;
    Ok(answer)
}

pub async fn delete<T>(mut store: T, id: i32) -> Result<Answer, Error>
where
    T: TxStore,
{
    let answer = AnswerCommon::get(&mut store, id).await?;
    AnswerCommon::delete(&mut store, id).await?;
    store.commit().await?;
    info!("answer {} of poll {} deleted, {} retired", id, answer.poll_id, answer.external_slot_id);
    Ok(answer)
}

pub async fn create_and_sync<M, P>(manager: &M, service: &P, data: AnswerCreate) -> Result<Answer, Error>
where
    M: Manager,
    P: PollService,
{
    let answer = create(manager.tx().await?, data).await?;
    let mut db = manager.db().await?;
    poll::sync(&mut db, service, answer.poll_id).await?;
    Ok(answer)
}

pub async fn update_and_sync<M, P>(manager: &M, service: &P, id: i32, data: AnswerUpdate) -> Result<Answer, Error>
where
    M: Manager,
    P: PollService,
{
    let answer = update(manager.tx().await?, id, data).await?;
    let mut db = manager.db().await?;
    poll::sync(&mut db, service, answer.poll_id).await?;
    Ok(answer)
}
