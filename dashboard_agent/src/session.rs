//! Per-connection streaming loop: Connecting → Active → Closed.
//!
//! A session owns its `SessionState` outright; nothing else reads or writes
//! it, so sessions need no locking and never observe each other. Closed is
//! reached when a delivery fails or when the client's half of the connection
//! ends (Close frame, EOF or read error).

use std::fmt::Display;
use std::time::Duration;

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::metrics::Aggregator;
use crate::readers::HostReaders;
use crate::state::SessionState;
use crate::types::Snapshot;

pub const PERIOD: Duration = Duration::from_secs(2);

pub struct Session<R> {
    aggregator: Aggregator<R>,
    state: SessionState,
    period: Duration,
}

impl<R: HostReaders> Session<R> {
    /// Connecting: seed the session from an initial reading.
    pub async fn open(aggregator: Aggregator<R>, period: Duration) -> Self {
        let state = aggregator.baseline().await;
        Self {
            aggregator,
            state,
            period,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// One Active cycle without the wait: collect and keep the new state.
    pub async fn tick(&mut self) -> Snapshot {
        let (snapshot, next) = self.aggregator.collect(&self.state).await;
        self.state = next;
        snapshot
    }

    /// Active loop. Frames go to `sink`; `incoming` is the client's half of
    /// the connection and is only watched for its end. Returns the number of
    /// frames delivered once the session is Closed.
    pub async fn run<S, I, E>(mut self, mut sink: S, incoming: I) -> u64
    where
        S: Sink<Message> + Unpin,
        S::Error: Display,
        I: Stream<Item = Result<Message, E>> + Unpin,
    {
        let client_done = client_closed(incoming);
        tokio::pin!(client_done);

        let mut sent = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = &mut client_done => {
                    info!(frames = sent, "client closed the connection");
                    // answers the client's Close frame
                    if let Err(e) = sink.close().await {
                        debug!(error = %e, "close handshake incomplete");
                    }
                    return sent;
                }
                delivered = self.cycle(&mut sink) => match delivered {
                    Ok(true) => {
                        sent += 1;
                        debug!(frames = sent, "snapshot delivered");
                    }
                    Ok(false) => {}
                    Err(e) => {
                        info!(error = %e, frames = sent, "client gone, closing session");
                        return sent;
                    }
                },
            }
        }
    }

    // sleep, collect, send; Ok(false) when the cycle was skipped
    async fn cycle<S>(&mut self, sink: &mut S) -> Result<bool, S::Error>
    where
        S: Sink<Message> + Unpin,
    {
        sleep(self.period).await;
        let snapshot = self.tick().await;
        let json = match serde_json::to_string(&snapshot) {
            Ok(js) => js,
            Err(e) => {
                warn!(error = %e, "snapshot serialization failed; skipping cycle");
                return Ok(false);
            }
        };
        sink.send(Message::Text(json)).await?;
        Ok(true)
    }
}

/// Resolves once the client stops talking: a Close frame, end of stream or a
/// read error. Other client messages are ignored.
async fn client_closed<I, E>(mut incoming: I)
where
    I: Stream<Item = Result<Message, E>> + Unpin,
{
    while let Some(Ok(msg)) = incoming.next().await {
        if let Message::Close(_) = msg {
            break;
        }
    }
}
