use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    common::Pagination,
    poll::{Insert as PollInsert, Poll, Query as PollQuery, Update as PollUpdate, DEFAULT_ANSWER_TYPE},
};
use crate::core::ports::repository::{AnswerCommon, Common, Manager, PollCommon, Store, TxStore};
use crate::error::Error;

#[derive(Default)]
struct Tables {
    polls: BTreeMap<i32, Poll>,
    answers: BTreeMap<i32, Answer>,
    poll_seq: i32,
    answer_seq: i32,
}

type Op = Box<dyn FnOnce(&mut Tables) + Send>;

// writes are buffered until commit; get_for_update holds a per-poll lock like SELECT ... FOR UPDATE
#[derive(Clone, Default)]
pub struct MemoryManager {
    tables: Arc<Mutex<Tables>>,
    row_locks: Arc<Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>>,
}

impl MemoryManager {
    fn store(&self, tx: bool) -> MemoryStore {
        MemoryStore {
            tables: self.tables.clone(),
            row_locks: self.row_locks.clone(),
            pending: if tx { Some(Vec::new()) } else { None },
            held: HashMap::new(),
        }
    }

    pub async fn insert_poll(&self, title: &str) -> i32 {
        let mut db = self.store(false);
        PollCommon::insert(
            &mut db,
            PollInsert {
                title: title.into(),
                question_text: String::new(),
                published_at: None,
                end_date: None,
                answer_type: DEFAULT_ANSWER_TYPE.into(),
            },
        )
        .await
        .unwrap()
    }

    pub fn poll(&self, id: i32) -> Poll {
        self.tables.lock().unwrap().polls[&id].clone()
    }

    pub fn polls(&self) -> Vec<Poll> {
        self.tables.lock().unwrap().polls.values().cloned().collect()
    }

    pub fn answers(&self, poll_id: i32) -> Vec<Answer> {
        self.tables.lock().unwrap().answers.values().filter(|a| a.poll_id == poll_id).cloned().collect()
    }
}

pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    row_locks: Arc<Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>>,
    pending: Option<Vec<Op>>,
    held: HashMap<i32, OwnedMutexGuard<()>>,
}

impl MemoryStore {
    fn write<F>(&mut self, op: F)
    where
        F: FnOnce(&mut Tables) + Send + 'static,
    {
        match &mut self.pending {
            Some(ops) => ops.push(Box::new(op)),
            None => op(&mut self.tables.lock().unwrap()),
        }
    }

    fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Tables) -> R,
    {
        f(&self.tables.lock().unwrap())
    }
}

fn poll_matches(query: &PollQuery, poll: &Poll) -> bool {
    (!query.active || poll.is_active(query.now)) && (!query.closed || poll.is_closed(query.now))
}

fn not_found<T>(v: Option<T>) -> Result<T, Error> {
    v.ok_or(Error::DatabaseError(sqlx::Error::RowNotFound))
}

impl PollCommon for MemoryStore {
    async fn insert(&mut self, data: PollInsert) -> Result<i32, Error> {
        let id = {
            let mut tables = self.tables.lock().unwrap();
            tables.poll_seq += 1;
            tables.poll_seq
        };
        self.write(move |t| {
            t.polls.insert(
                id,
                Poll {
                    id,
                    title: data.title,
                    question_text: data.question_text,
                    external_id: String::new(),
                    last_answer_index: 0,
                    published_at: data.published_at,
                    end_date: data.end_date,
                    answer_type: data.answer_type,
                },
            );
        });
        Ok(id)
    }

    async fn update(&mut self, id: i32, data: PollUpdate) -> Result<(), Error> {
        self.write(move |t| {
            if let Some(p) = t.polls.get_mut(&id) {
                p.title = data.title;
                p.question_text = data.question_text;
                p.published_at = data.published_at;
                p.end_date = data.end_date;
                p.answer_type = data.answer_type;
            }
        });
        Ok(())
    }

    async fn get(&mut self, id: i32) -> Result<Poll, Error> {
        not_found(self.read(|t| t.polls.get(&id).cloned()))
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Poll, Error> {
        if self.pending.is_some() && !self.held.contains_key(&id) {
            let lock = self.row_locks.lock().unwrap().entry(id).or_default().clone();
            let guard = lock.lock_owned().await;
            self.held.insert(id, guard);
        }
        tokio::task::yield_now().await;
        PollCommon::get(self, id).await
    }

    async fn query(&mut self, query: &PollQuery, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error> {
        let (offset, limit) = pagination.map(|p| (p.offset() as usize, p.limit() as usize)).unwrap_or((0, usize::MAX));
        Ok(self.read(|t| t.polls.values().filter(|p| poll_matches(query, p)).skip(offset).take(limit).cloned().collect()))
    }

    async fn count(&mut self, query: &PollQuery) -> Result<i64, Error> {
        Ok(self.read(|t| t.polls.values().filter(|p| poll_matches(query, p)).count() as i64))
    }

    async fn set_external_id(&mut self, id: i32, external_id: &str) -> Result<(), Error> {
        let external_id = external_id.to_owned();
        self.write(move |t| {
            if let Some(p) = t.polls.get_mut(&id) {
                p.external_id = external_id;
            }
        });
        Ok(())
    }

    async fn set_last_answer_index(&mut self, id: i32, index: i32) -> Result<(), Error> {
        self.write(move |t| {
            if let Some(p) = t.polls.get_mut(&id) {
                p.last_answer_index = index;
            }
        });
        Ok(())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.write(move |t| {
            t.polls.remove(&id);
            t.answers.retain(|_, a| a.poll_id != id);
        });
        Ok(())
    }
}

impl AnswerCommon for MemoryStore {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error> {
        let id = {
            let mut tables = self.tables.lock().unwrap();
            tables.answer_seq += 1;
            tables.answer_seq
        };
        tokio::task::yield_now().await;
        self.write(move |t| {
            t.answers.insert(
                id,
                Answer {
                    id,
                    poll_id: answer.poll_id,
                    external_slot_id: answer.external_slot_id,
                    text: answer.text,
                },
            );
        });
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Answer, Error> {
        not_found(self.read(|t| t.answers.get(&id).cloned()))
    }

    async fn query(&mut self, query: &AnswerQuery) -> Result<Vec<Answer>, Error> {
        Ok(self.read(|t| t.answers.values().filter(|a| query.poll_id_eq.map(|p| a.poll_id == p).unwrap_or(true)).cloned().collect()))
    }

    async fn update_text(&mut self, id: i32, text: &str) -> Result<(), Error> {
        let text = text.to_owned();
        self.write(move |t| {
            if let Some(a) = t.answers.get_mut(&id) {
                a.text = text;
            }
        });
        Ok(())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.write(move |t| {
            t.answers.remove(&id);
        });
        Ok(())
    }
}

impl Common for MemoryStore {}
impl Store for MemoryStore {}

impl TxStore for MemoryStore {
    async fn commit(mut self) -> Result<(), Error> {
        if let Some(ops) = self.pending.take() {
            let mut tables = self.tables.lock().unwrap();
            for op in ops {
                op(&mut tables);
            }
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}

impl Manager for MemoryManager {
    type Store = MemoryStore;
    type TxStore = MemoryStore;

    async fn db(&self) -> Result<MemoryStore, Error> {
        Ok(self.store(false))
    }

    async fn tx(&self) -> Result<MemoryStore, Error> {
        Ok(self.store(true))
    }
}
