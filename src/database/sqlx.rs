use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    common::Pagination,
    poll::{Insert as PollInsert, Poll, Query as PollQuery, Update as PollUpdate},
};
use crate::core::ports::repository::{AnswerCommon, Common, Manager, PollCommon, Store, TxStore};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn push_poll_filters(stmt: &mut QueryBuilder<Postgres>, query: &PollQuery) {
    stmt.push(" WHERE 1 = 1");
    if query.active {
        stmt.push(" AND published_at <= ").push_bind(query.now);
    }
    if query.closed {
        stmt.push(" AND end_date <= ").push_bind(query.now);
    }
}

impl<E> PollCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: PollInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO polls (title, question_text, published_at, end_date, answer_type) VALUES ($1, $2, $3, $4, $5) RETURNING id")
            .bind(data.title)
            .bind(data.question_text)
            .bind(data.published_at)
            .bind(data.end_date)
            .bind(data.answer_type)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, data: PollUpdate) -> Result<(), Error> {
        query("UPDATE polls SET title = $1, question_text = $2, published_at = $3, end_date = $4, answer_type = $5 WHERE id = $6")
            .bind(data.title)
            .bind(data.question_text)
            .bind(data.published_at)
            .bind(data.end_date)
            .bind(data.answer_type)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn get(&mut self, id: i32) -> Result<Poll, Error> {
        let poll = query_as("SELECT * FROM polls WHERE id = $1").bind(id).fetch_one(&mut self.executor).await?;
        Ok(poll)
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Poll, Error> {
        let poll = query_as("SELECT * FROM polls WHERE id = $1 FOR UPDATE").bind(id).fetch_one(&mut self.executor).await?;
        Ok(poll)
    }

    async fn query(&mut self, query: &PollQuery, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM polls");
        push_poll_filters(&mut stmt, query);
        stmt.push(" ORDER BY id");
        if let Some(p) = pagination {
            stmt.push(" LIMIT ").push_bind(p.limit());
            stmt.push(" OFFSET ").push_bind(p.offset());
        }
        let polls = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(polls)
    }

    async fn count(&mut self, query: &PollQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(id) FROM polls");
        push_poll_filters(&mut stmt, query);
        let (n,) = stmt.build_query_as().fetch_one(&mut self.executor).await?;
        Ok(n)
    }

    async fn set_external_id(&mut self, id: i32, external_id: &str) -> Result<(), Error> {
        query("UPDATE polls SET external_id = $1 WHERE id = $2")
            .bind(external_id)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn set_last_answer_index(&mut self, id: i32, index: i32) -> Result<(), Error> {
        query("UPDATE polls SET last_answer_index = $1 WHERE id = $2")
            .bind(index)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        query("DELETE FROM polls WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(())
    }
}

impl<E> AnswerCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO answers (poll_id, external_slot_id, text) VALUES ($1, $2, $3) RETURNING id")
            .bind(answer.poll_id)
            .bind(answer.external_slot_id)
            .bind(answer.text)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Answer, Error> {
        let answer = query_as("SELECT * FROM answers WHERE id = $1").bind(id).fetch_one(&mut self.executor).await?;
        Ok(answer)
    }

    async fn query(&mut self, query: &AnswerQuery) -> Result<Vec<Answer>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM answers WHERE 1 = 1");
        if let Some(poll_id) = query.poll_id_eq {
            stmt.push(" AND poll_id = ").push_bind(poll_id);
        }
        stmt.push(" ORDER BY id");
        let answers = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(answers)
    }

    async fn update_text(&mut self, id: i32, text: &str) -> Result<(), Error> {
        query("UPDATE answers SET text = $1 WHERE id = $2").bind(text).bind(id).execute(&mut self.executor).await?;
        Ok(())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        query("DELETE FROM answers WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(())
    }
}

impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl Common for PgSqlx<Transaction<'static, Postgres>> {}
impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl Store for PgSqlx<Transaction<'static, Postgres>> {}

impl TxStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
