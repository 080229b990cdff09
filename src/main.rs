use actix_web::{middleware::Logger, App, HttpServer};
use color_eyre::eyre::{Report, WrapErr};
use dotenv::dotenv;
use polls_server::{config::Config, db, log, server};
use tracing::info;

#[actix_rt::main]
async fn main() -> Result<(), Report> {
    dotenv().ok();
    log::init()?;
    let config = Config::from_env()?;

    let pool = db::new_pool(&config.database_url)
        .await
        .wrap_err_with(|| format!("Failed to open database {}", config.database_url))?;
    db::migrate(&pool).await.wrap_err("Failed to run migrations")?;
    server::register_db_actor(pool);

    info!("Starting HTTP server on {}", config.bind_address);
    HttpServer::new(|| {
        App::new()
            .wrap(Logger::default())
            .configure(server::configure)
    })
    .bind(config.bind_address)?
    .run()
    .await?;
    Ok(())
}
