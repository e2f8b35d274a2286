use actix_web::{web, App, HttpServer};
use anyhow::Context;
use lr_api::{app, logging, middleware::ErrorHandlerMiddleware, routes};
use lr_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!(environment = %config.environment, "Starting Lingua Render demo server");

    app::install_catalog(&config.catalog)?;

    let errors = config.errors.clone();
    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandlerMiddleware::new(errors.clone()))
            .configure(app::configure)
            .default_service(web::route().to(routes::not_found))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
