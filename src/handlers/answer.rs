use actix_web::{
    http::StatusCode,
    web::{Data, Json, Path},
    HttpResponse,
};

use crate::core::models::answer::{Answer, AnswerCreate, AnswerUpdate};
use crate::core::ports::{poll_service::PollService, repository::Manager};
use crate::core::services::answer as service;
use crate::error::Error;

pub async fn create<M, P>(Json(body): Json<AnswerCreate>, manager: Data<M>, provider: Data<P>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let answer = service::create_and_sync(manager.get_ref(), provider.get_ref(), body).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(answer))
}

pub async fn detail<M>(path: Path<(i32,)>, manager: Data<M>) -> Result<Json<Answer>, Error>
where
    M: Manager + 'static,
{
    let answer_id = path.into_inner().0;
    let mut db = manager.db().await?;
    Ok(Json(service::get(&mut db, answer_id).await?))
}

pub async fn update<M, P>(path: Path<(i32,)>, Json(body): Json<AnswerUpdate>, manager: Data<M>, provider: Data<P>) -> Result<Json<Answer>, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let answer_id = path.into_inner().0;
    Ok(Json(service::update_and_sync(manager.get_ref(), provider.get_ref(), answer_id, body).await?))
}

pub async fn delete<M>(path: Path<(i32,)>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let answer_id = path.into_inner().0;
    service::delete(manager.tx().await?, answer_id).await?;
    Ok(HttpResponse::build(StatusCode::NO_CONTENT).finish())
}
