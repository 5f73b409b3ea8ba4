use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    common::Pagination,
    poll::{Insert as PollInsert, Poll, Query as PollQuery, Update as PollUpdate},
};
use crate::error::Error;

pub trait PollCommon {
    async fn insert(&mut self, data: PollInsert) -> Result<i32, Error>;
    async fn update(&mut self, id: i32, data: PollUpdate) -> Result<(), Error>;
    async fn get(&mut self, id: i32) -> Result<Poll, Error>;
    // row lock held until the transaction ends
    async fn get_for_update(&mut self, id: i32) -> Result<Poll, Error>;
    async fn query(&mut self, query: &PollQuery, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error>;
    async fn count(&mut self, query: &PollQuery) -> Result<i64, Error>;
    async fn set_external_id(&mut self, id: i32, external_id: &str) -> Result<(), Error>;
    async fn set_last_answer_index(&mut self, id: i32, index: i32) -> Result<(), Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
}

pub trait AnswerCommon {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Answer, Error>;
    async fn query(&mut self, query: &AnswerQuery) -> Result<Vec<Answer>, Error>;
    async fn update_text(&mut self, id: i32, text: &str) -> Result<(), Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
}

pub trait Common: PollCommon + AnswerCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
