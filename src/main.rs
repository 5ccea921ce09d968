mod config;
mod error;
mod handlers;
mod models;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use config::Config;
use services::VkApi;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("loaded configuration: {:?}", config);

    let vk = match VkApi::new(config.vk.clone()) {
        Ok(vk) => vk,
        Err(e) => {
            log::error!("failed to build VK client: {}", e);
            std::process::exit(1);
        }
    };
    let app_state = web::Data::new(AppState::new(vk));

    log::info!(
        "listening on {}:{} for VK group {}",
        config.host,
        config.port,
        config.vk.group_id
    );

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(handlers::routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
