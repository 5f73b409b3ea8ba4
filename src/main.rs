mod config;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod request;
mod response;

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use log::info;
use sqlx::postgres::PgPoolOptions;

use config::Config;
use database::sqlx::PgSqlxManager;
use impls::sodahead::Sodahead;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let manager = Data::new(PgSqlxManager::new(pool));
    let sodahead = Data::new(Sodahead::from_config(&config)?);
    info!("listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(manager.clone())
            .app_data(sodahead.clone())
            .configure(handlers::configure::<PgSqlxManager, Sodahead>)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;
    Ok(())
}
