use std::fs;
use std::path::Path;

use crate::error::ReaderError;
use crate::state::NetSample;

pub fn read_net_sample(proc_root: &Path, interface: &str) -> Result<NetSample, ReaderError> {
    let path = proc_root.join("net/dev");
    let text = fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))?;
    parse_net_dev(&text, interface)
}

/// Counters for `interface` from the /proc/net/dev table (two header lines,
/// then "iface: rx_bytes packets errs drop fifo frame compressed multicast tx_bytes ...").
pub fn parse_net_dev(text: &str, interface: &str) -> Result<NetSample, ReaderError> {
    for line in text.lines().skip(2) {
        // older kernels glue the first counter to the colon
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        if name.trim() != interface {
            continue;
        }
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            return Err(ReaderError::malformed(
                "/proc/net/dev",
                format!("{} counters for {interface}", fields.len()),
            ));
        }
        let parse = |tok: &str| {
            tok.parse::<u64>()
                .map_err(|_| ReaderError::malformed("/proc/net/dev", format!("bad counter {tok:?}")))
        };
        return Ok(NetSample {
            rx_bytes: parse(fields[0])?,
            tx_bytes: parse(fields[8])?,
        });
    }
    Err(ReaderError::InterfaceNotFound(interface.to_string()))
}
