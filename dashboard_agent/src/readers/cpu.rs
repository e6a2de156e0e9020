//! CPU ticks, CPU temperature and memory from procfs/sysfs.

use std::fs;
use std::path::Path;

use sysinfo::Components;

use crate::error::ReaderError;
use crate::state::CpuSample;
use crate::types::{CpuTemp, RamInfo};

const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

pub fn read_cpu_sample(proc_root: &Path) -> Result<CpuSample, ReaderError> {
    let path = proc_root.join("stat");
    let text = fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))?;
    parse_cpu_sample(&text)
}

/// Aggregate "cpu" line: "cpu  user nice system idle iowait irq softirq steal ..."
pub fn parse_cpu_sample(text: &str) -> Result<CpuSample, ReaderError> {
    let line = text
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| ReaderError::malformed("/proc/stat", "no aggregate cpu line"))?;

    let mut sample = CpuSample::default();
    for (i, tok) in line.split_whitespace().skip(1).enumerate() {
        let v = tok
            .parse::<u64>()
            .map_err(|_| ReaderError::malformed("/proc/stat", format!("bad tick count {tok:?}")))?;
        sample.total_ticks = sample.total_ticks.saturating_add(v);
        // idle, iowait
        if i == 3 || i == 4 {
            sample.idle_ticks = sample.idle_ticks.saturating_add(v);
        }
    }
    if sample.total_ticks == 0 {
        return Err(ReaderError::malformed("/proc/stat", "empty cpu line"));
    }
    Ok(sample)
}

/// First thermal zone, then any CPU-labelled hardware sensor.
pub fn read_cpu_temp(sys_root: &Path) -> Result<CpuTemp, ReaderError> {
    let path = sys_root.join("class/thermal/thermal_zone0/temp");
    let celsius = match fs::read_to_string(&path) {
        Ok(text) => parse_millidegrees(&text)?,
        Err(e) => sensor_cpu_temp().ok_or_else(|| ReaderError::io(&path, e))?,
    };
    Ok(CpuTemp {
        display: format!("{celsius:.1}°C"),
        celsius,
    })
}

pub fn parse_millidegrees(text: &str) -> Result<f64, ReaderError> {
    let raw = text.trim();
    raw.parse::<f64>()
        .map(|m| m / 1000.0)
        .map_err(|_| ReaderError::malformed("thermal zone", format!("{raw:?}")))
}

fn sensor_cpu_temp() -> Option<f64> {
    let components = Components::new_with_refreshed_list();
    components
        .iter()
        .filter(|c| {
            let label = c.label().to_ascii_lowercase();
            label.contains("cpu")
                || label.contains("package")
                || label.contains("tctl")
                || label.contains("tdie")
        })
        .filter_map(|c| c.temperature())
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(f64::from)
}

pub fn read_ram(proc_root: &Path) -> Result<RamInfo, ReaderError> {
    let path = proc_root.join("meminfo");
    let text = fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))?;
    let (total_kib, available_kib) = parse_meminfo(&text)?;
    Ok(ram_info(total_kib, available_kib))
}

/// (MemTotal, MemAvailable) in KiB.
pub fn parse_meminfo(text: &str) -> Result<(f64, f64), ReaderError> {
    let mut total = None;
    let mut available = None;
    for line in text.lines() {
        let mut it = line.split_whitespace();
        let (Some(key), Some(value)) = (it.next(), it.next()) else {
            continue;
        };
        let slot = match key {
            "MemTotal:" => &mut total,
            "MemAvailable:" => &mut available,
            _ => continue,
        };
        *slot = Some(
            value
                .parse::<f64>()
                .map_err(|_| ReaderError::malformed("/proc/meminfo", line.to_string()))?,
        );
    }
    match (total, available) {
        (Some(t), Some(a)) => Ok((t, a)),
        _ => Err(ReaderError::malformed(
            "/proc/meminfo",
            "MemTotal or MemAvailable missing",
        )),
    }
}

pub fn ram_info(total_kib: f64, available_kib: f64) -> RamInfo {
    let used = total_kib - available_kib;
    let percent = if total_kib > 0.0 {
        (used * 100.0 / total_kib).clamp(0.0, 100.0)
    } else {
        0.0
    };
    RamInfo {
        used: format!("{:.1} GB", used / KIB_PER_GIB),
        total: format!("{:.1} GB", total_kib / KIB_PER_GIB),
        percent: format!("{percent:.1}%"),
        percent_num: percent,
    }
}
