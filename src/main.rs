use market_data_gateway::config::GatewayConfig;
use market_data_gateway::server::run_server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,market_data_gateway=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = GatewayConfig::load()?;

    run_server(config).await?;
    Ok(())
}
