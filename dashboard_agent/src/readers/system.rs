//! Uptime, OS name, kernel release and CPU model.

use std::fs;
use std::path::Path;

use crate::error::ReaderError;
use crate::readers::command::run_command;

pub const DEFAULT_OS_NAME: &str = "Unraid OS";

pub fn read_uptime_secs(proc_root: &Path) -> Result<f64, ReaderError> {
    let path = proc_root.join("uptime");
    let text = fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))?;
    let first = text.split_whitespace().next().unwrap_or_default();
    first
        .parse::<f64>()
        .map_err(|_| ReaderError::malformed("/proc/uptime", format!("{first:?}")))
}

/// "Xd Yh Zm"
pub fn format_uptime(secs: f64) -> String {
    let secs = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    let days = secs / 86_400;
    let hours = (secs / 3_600) % 24;
    let minutes = (secs / 60) % 60;
    format!("{days}d {hours}h {minutes}m")
}

pub fn read_os_name(os_release: &Path) -> Result<String, ReaderError> {
    let text = fs::read_to_string(os_release).map_err(|e| ReaderError::io(os_release, e))?;
    parse_os_release(&text)
        .ok_or_else(|| ReaderError::malformed("os-release", "no PRETTY_NAME"))
}

pub fn parse_os_release(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .filter_map(|l| l.strip_prefix("PRETTY_NAME="))
        .map(|v| v.trim().trim_matches('"').to_string())
        .find(|v| !v.is_empty())
}

pub fn read_kernel_release() -> Result<String, ReaderError> {
    run_command("uname", &["-r"])
}

pub fn read_cpu_model(proc_root: &Path) -> Result<String, ReaderError> {
    let path = proc_root.join("cpuinfo");
    let text = fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))?;
    parse_cpu_model(&text).ok_or_else(|| ReaderError::malformed("/proc/cpuinfo", "no model name"))
}

pub fn parse_cpu_model(text: &str) -> Option<String> {
    text.lines()
        .find(|l| l.starts_with("model name"))
        .and_then(|l| l.split_once(':'))
        .map(|(_, v)| v.trim().to_string())
}
