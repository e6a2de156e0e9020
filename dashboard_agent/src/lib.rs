//! Host metrics collector: samples kernel counters, storage and media-server
//! state and streams one JSON snapshot per period to each WebSocket client.

pub mod config;
pub mod delta;
pub mod error;
pub mod metrics;
pub mod readers;
pub mod session;
pub mod state;
pub mod types;
pub mod ws;
