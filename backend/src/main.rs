use actix_web::{App, HttpServer, middleware::Logger, web};
use backend::{config::Config, routes, state::AppState};
use dotenv::dotenv;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let state = AppState::connect(&config)
        .await
        .map_err(std::io::Error::other)?;
    let state_data = web::Data::new(state);

    info!("Serving advice in {} mode on {}", config.mode, config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state_data.clone())
            .configure(routes::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
