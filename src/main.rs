mod web;

use std::sync::Arc;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use careerpress::config::Settings;
use careerpress::db::Database;
use careerpress::services::PerformanceCache;

use crate::web::middleware::SecurityHeaders;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let db = Database::new(&settings.database_url)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let bind_addr = settings.bind_addr.clone();
    let state = Data::new(web::AppState {
        pool: db.pool,
        settings: Arc::new(settings),
        cache: Arc::new(PerformanceCache::new()),
    });

    log::info!("Listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .configure(web::handlers::configure)
            .service(Files::new("/static", "./static").prefer_utf8(true))
    })
    .bind(bind_addr)?
    .run()
    .await
}
