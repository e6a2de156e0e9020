//! Delta engine: turns two cumulative counter samples into a rate.
//! Stateless; the caller owns the previous sample and its timestamp.

use crate::state::{CpuSample, NetSample};

pub trait Delta {
    type Rate;

    /// Rate between `self` (older) and `curr` over `elapsed_secs`.
    fn rate(&self, curr: &Self, elapsed_secs: f64) -> Self::Rate;
}

impl Delta for CpuSample {
    type Rate = f64;

    /// Busy percentage in [0, 100]. Elapsed time is irrelevant: ticks already
    /// measure the interval.
    fn rate(&self, curr: &Self, _elapsed_secs: f64) -> f64 {
        cpu_usage_percent(self, curr)
    }
}

/// Bytes per second, received then transmitted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetRate {
    pub rx_bytes_per_sec: f64,
    pub tx_bytes_per_sec: f64,
}

impl Delta for NetSample {
    type Rate = NetRate;

    fn rate(&self, curr: &Self, elapsed_secs: f64) -> NetRate {
        NetRate {
            rx_bytes_per_sec: bytes_per_sec(self.rx_bytes, curr.rx_bytes, elapsed_secs),
            tx_bytes_per_sec: bytes_per_sec(self.tx_bytes, curr.tx_bytes, elapsed_secs),
        }
    }
}

pub fn cpu_usage_percent(prev: &CpuSample, curr: &CpuSample) -> f64 {
    // counter reset (reboot) or no ticks elapsed
    if curr.total_ticks <= prev.total_ticks {
        return 0.0;
    }
    let d_total = (curr.total_ticks - prev.total_ticks) as f64;
    let d_idle = curr.idle_ticks as f64 - prev.idle_ticks as f64;
    ((1.0 - d_idle / d_total) * 100.0).clamp(0.0, 100.0)
}

pub fn bytes_per_sec(prev: u64, curr: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return 0.0;
    }
    curr.saturating_sub(prev) as f64 / elapsed_secs
}

pub fn megabits_per_sec(bytes_per_sec: f64) -> f64 {
    bytes_per_sec * 8.0 / 1_000_000.0
}

/// "N.N Mb/s"
pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{:.1} Mb/s", megabits_per_sec(bytes_per_sec))
}

/// "NN%"
pub fn format_usage(percent: f64) -> String {
    format!("{percent:.0}%")
}
