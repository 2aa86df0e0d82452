use aeps_gateway::{config::Config, server::Server, setup, telemetry};
use color_eyre::eyre::Context;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    telemetry::init_tracing();

    let config = Config::load().wrap_err("Failed to load configuration")?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        aeps = %config.aeps.base_url,
        estamp = %config.estamp.base_url,
        "Loaded configuration"
    );

    let state = setup::build_state(&config)?;
    let server = Server::new(state, &config.server).await?;
    server.run().await
}
