use actix_web::{
    http::{header, StatusCode},
    web::{Data, Json, Path, Query},
    HttpResponse,
};

use crate::core::models::{
    common::Pagination,
    poll::{Poll, PollCreate, PollDetail, PollUpdate},
};
use crate::core::ports::{poll_service::PollService, repository::Manager};
use crate::core::services::poll as service;
use crate::error::Error;
use crate::request::PollListQuery;
use crate::response::List;

pub async fn create<M, P>(Json(body): Json<PollCreate>, manager: Data<M>, provider: Data<P>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let poll = service::create(manager.get_ref(), provider.get_ref(), body).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(poll))
}

pub async fn list<M>(Query(q): Query<PollListQuery>, manager: Data<M>) -> Result<Json<List<Poll>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let (polls, total) = service::list(&mut db, q.active, q.closed, Pagination::page(q.page, q.size)).await?;
    Ok(Json(List::new(polls, total)))
}

pub async fn detail<M>(path: Path<(i32,)>, manager: Data<M>) -> Result<Json<PollDetail>, Error>
where
    M: Manager + 'static,
{
    let poll_id = path.into_inner().0;
    let mut db = manager.db().await?;
    Ok(Json(service::get(&mut db, poll_id).await?))
}

pub async fn update<M, P>(path: Path<(i32,)>, Json(body): Json<PollUpdate>, manager: Data<M>, provider: Data<P>) -> Result<Json<Poll>, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let poll_id = path.into_inner().0;
    Ok(Json(service::update(manager.get_ref(), provider.get_ref(), poll_id, body).await?))
}

pub async fn delete<M, P>(path: Path<(i32,)>, manager: Data<M>, provider: Data<P>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let poll_id = path.into_inner().0;
    service::delete(manager.get_ref(), provider.get_ref(), poll_id).await?;
    Ok(HttpResponse::build(StatusCode::NO_CONTENT).finish())
}

pub async fn sync<M, P>(path: Path<(i32,)>, manager: Data<M>, provider: Data<P>) -> Result<Json<Poll>, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let poll_id = path.into_inner().0;
    let mut db = manager.db().await?;
    Ok(Json(service::sync(&mut db, provider.get_ref(), poll_id).await?))
}

pub async fn merged<M, P>(path: Path<(i32,)>, manager: Data<M>, provider: Data<P>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    let poll_id = path.into_inner().0;
    let mut db = manager.db().await?;
    let merged = service::merged(&mut db, provider.get_ref(), poll_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::CACHE_CONTROL, "max-age=600"))
        .json(merged))
}
