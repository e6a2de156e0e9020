//! HTTP surface: the WebSocket upgrade on /ws, one streaming session per
//! connection, and the dashboard assets on every other path.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        ConnectInfo, State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures_util::StreamExt;
use tower_http::services::ServeDir;
use tracing::{info, info_span, Instrument};

use crate::readers::HostReaders;
use crate::session::Session;
use crate::state::AppState;

pub fn router<R: HostReaders>(state: AppState<R>) -> Router {
    let assets = ServeDir::new(&state.frontend_dir);
    Router::new()
        .route("/ws", get(ws_handler::<R>))
        .fallback_service(assets)
        .with_state(state)
}

pub async fn ws_handler<R: HostReaders>(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState<R>>,
) -> Response {
    ws.on_upgrade(move |socket| {
        handle_socket(socket, state).instrument(info_span!("session", %peer))
    })
}

async fn handle_socket<R: HostReaders>(socket: WebSocket, state: AppState<R>) {
    let clients = state.client_count.fetch_add(1, Ordering::Relaxed) + 1;
    info!(clients, "client connected");

    // Decrement on every exit path, including a cancelled task.
    struct ClientGuard(Arc<AtomicUsize>);
    impl Drop for ClientGuard {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::Relaxed);
        }
    }
    let _guard = ClientGuard(Arc::clone(&state.client_count));

    let (sink, incoming) = socket.split();
    let session = Session::open(state.aggregator, state.period).await;
    let frames = session.run(sink, incoming).await;
    info!(frames, "session closed");
}
