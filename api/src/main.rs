use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

use bb_api::{app, logging, AppState};
use bb_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env, config/{environment}.toml, APP__* variables)
    let config = AppConfig::load()?;
    logging::init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting Bluebook API server");

    let infrastructure = bb_infra::initialize(&config).await?;
    let state = web::Data::new(AppState::new(infrastructure, &config.verification));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(app::configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
