use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use frete::api::DynAPI;
use frete::config::Config;
use frete::engine::Engine;
use frete::external::{geocode_provider, route_provider};
use frete::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frete=info")),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {}", e);
            process::exit(1);
        }
    };

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("failed to build providers: {}", e);
            process::exit(1);
        }
    };

    let addr = SocketAddr::new(config.host, config.port);

    if let Err(e) = serve(Arc::new(engine) as DynAPI, addr).await {
        tracing::error!("server error: {}", e);
        process::exit(1);
    }
}

fn build_engine(config: &Config) -> Result<Engine, frete::error::Error> {
    let geocoder = geocode_provider(config)?;
    let router = route_provider(config)?;

    tracing::info!(
        geocoder = geocoder.name(),
        router = router.name(),
        "providers configured"
    );

    Ok(Engine::new(geocoder).with_router(router))
}
