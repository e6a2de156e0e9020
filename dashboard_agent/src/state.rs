//! Counter samples, per-connection session state and the shared app state.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::metrics::Aggregator;

/// Aggregate CPU tick counters from one read of the kernel's cpu line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub idle_ticks: u64, // idle + iowait
    pub total_ticks: u64,
}

/// Cumulative byte counters of the monitored interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetSample {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Previous-reading state owned by exactly one streaming session.
///
/// A `None` sample means the baseline read failed; the next cycle reports a
/// zero rate for that family and reseeds from its fresh sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub cpu: Option<CpuSample>,
    pub net: Option<NetSample>,
    pub taken_at: Instant,
}

/// Handed to every new connection: the shared reader set, the delivery
/// period and where the dashboard assets live. No session state lives here.
pub struct AppState<R> {
    pub aggregator: Aggregator<R>,
    pub period: Duration,
    pub frontend_dir: PathBuf,

    // Open WebSocket sessions
    pub client_count: Arc<AtomicUsize>,
}

impl<R> AppState<R> {
    pub fn new(aggregator: Aggregator<R>, period: Duration, frontend_dir: PathBuf) -> Self {
        Self {
            aggregator,
            period,
            frontend_dir,
            client_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn clients(&self) -> usize {
        self.client_count.load(Ordering::Relaxed)
    }
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
            period: self.period,
            frontend_dir: self.frontend_dir.clone(),
            client_count: Arc::clone(&self.client_count),
        }
    }
}
