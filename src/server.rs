use crate::{db::DbExecutor, urls, views};
use actix::prelude::*;
use actix::registry::SystemRegistry;
use actix_web::web;
use sqlx::SqlitePool;

/// Starts the database actor and makes it reachable through
/// `DbExecutor::from_registry()`. Call once per actix system.
pub fn register_db_actor(pool: SqlitePool) {
    SystemRegistry::set(DbExecutor(pool).start());
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(urls::SCOPE)
            .route("/", web::get().to(views::index))
            .route("/{question_id}/", web::get().to(views::detail))
            .route("/{question_id}/results/", web::get().to(views::results))
            .route("/{question_id}/vote/", web::post().to(views::vote)),
    );
}
