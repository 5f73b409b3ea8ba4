pub mod answer;
pub mod poll;

use actix_web::web::{delete, get, post, put, resource, scope, ServiceConfig};

use crate::core::ports::{poll_service::PollService, repository::Manager};

pub fn configure<M, P>(cfg: &mut ServiceConfig)
where
    M: Manager + 'static,
    P: PollService + 'static,
{
    cfg.service(
        scope("polls")
            .service(resource("").route(post().to(poll::create::<M, P>)).route(get().to(poll::list::<M>)))
            .service(
                scope("{poll_id}")
                    .route("", get().to(poll::detail::<M>))
                    .route("", put().to(poll::update::<M, P>))
                    .route("", delete().to(poll::delete::<M, P>))
                    .route("sync", post().to(poll::sync::<M, P>))
                    .route("merged", get().to(poll::merged::<M, P>)),
            ),
    )
    .service(
        scope("answers").route("", post().to(answer::create::<M, P>)).service(
            scope("{answer_id}")
                .route("", get().to(answer::detail::<M>))
                .route("", put().to(answer::update::<M, P>))
                .route("", delete().to(answer::delete::<M>)),
        ),
    );
}
