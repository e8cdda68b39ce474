use std::{sync::Arc, time::Duration};

use clap::Parser;
use terranova_api::{
    application::{
        http::server::http_server::{router, state},
        sessions::spawn_idle_sweep,
    },
    args::{Args, LogArgs},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log: &LogArgs) {
    let filter = EnvFilter::try_new(&log.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if log.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_tracing(&args.log);

    let app_state = state(args.clone())?;
    // idle sessions outlive the TTL by at most a quarter of it
    let sweep_every = Duration::from_secs((args.server.session_idle_ttl_secs / 4).max(1));
    spawn_idle_sweep(app_state.sessions.clone(), sweep_every);
    let app = router(app_state)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, backend = %args.backend.url, "TerraNova API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
