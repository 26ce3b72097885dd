//! RPS Player Service binary.

use rps_view_core::{GameClient, GameLedger, MockLedger, RpcLedger, SystemClock};
use rps_view_player::{config::Config, create_router, PlayerState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;

    let (ledger, mock): (Arc<dyn GameLedger>, Option<MockLedger>) = match &config.ledger_rpc_url {
        Some(url) => {
            info!("Using ledger gateway: {}", url);
            (Arc::new(RpcLedger::new(url.clone())), None)
        }
        None => {
            info!("Using MockLedger (set LEDGER_RPC_URL to talk to a real ledger gateway)");
            let mock = MockLedger::new();
            (Arc::new(mock.clone()), Some(mock))
        }
    };

    let client = GameClient::new(ledger, Arc::new(SystemClock), config.viewer);
    let state = Arc::new(PlayerState::new(client, mock));

    info!("Viewer: {}", config.viewer);

    let app = create_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Player service listening on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
