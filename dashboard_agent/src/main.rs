//! dashboard_agent: streams host metrics to WebSocket clients on /ws.

use std::{env, net::SocketAddr, sync::Arc};

use dashboard_agent::config::{parse_args, usage, AgentConfig};
use dashboard_agent::metrics::Aggregator;
use dashboard_agent::readers::ProcReaders;
use dashboard_agent::session::PERIOD;
use dashboard_agent::state::AppState;
use dashboard_agent::ws::router;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args(env::args())?;
    if cli.help {
        let prog = env::args().next().unwrap_or_else(|| "dashboard_agent".into());
        println!("{}", usage(&prog));
        return Ok(());
    }
    init_tracing();

    let mut config = AgentConfig::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    let config = Arc::new(config);

    let readers = Arc::new(ProcReaders::new(Arc::clone(&config))?);
    let state = AppState::new(
        Aggregator::new(readers),
        PERIOD,
        config.frontend_dir.clone(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        interface = %config.net_interface,
        media_server = config.plex_url.is_some(),
        frontend = %config.frontend_dir.display(),
        "dashboard agent listening on ws://{addr}/ws"
    );
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
