//! ZFS pool topology (from a saved `zpool status` report) and ARC statistics.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ReaderError;
use crate::types::{ArcCache, Vdev, ZfsConfig};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn read_zpool_status(path: &Path) -> Result<ZfsConfig, ReaderError> {
    let text = fs::read_to_string(path).map_err(|e| ReaderError::io(path, e))?;
    Ok(parse_zpool_status(&text))
}

// Which vdev the next device line belongs to.
#[derive(Clone, Copy)]
enum Parent {
    None,
    Data(usize),
    Cache,
}

pub fn parse_zpool_status(text: &str) -> ZfsConfig {
    let mut cfg = ZfsConfig::default();
    let mut in_table = false;
    let mut parent = Parent::None;

    for line in text.lines() {
        if line.trim_start().starts_with("errors:") {
            break;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if !in_table {
            if line.contains("NAME") && line.contains("STATE") {
                in_table = true;
            } else if fields.len() >= 2 {
                match fields[0] {
                    "pool:" => cfg.pool_name = fields[1].to_string(),
                    "state:" => cfg.pool_status = fields[1].to_string(),
                    _ => {}
                }
            }
            continue;
        }

        let Some(&name) = fields.first() else {
            continue;
        };
        // the pool's own row heads the table
        if name == cfg.pool_name {
            continue;
        }
        let status = fields.get(1).copied().unwrap_or_default().to_string();

        if name.starts_with("raidz") || name.starts_with("mirror") {
            cfg.data_vdevs.push(Vdev {
                name: name.to_string(),
                status,
                devices: Vec::new(),
            });
            parent = Parent::Data(cfg.data_vdevs.len() - 1);
        } else if name == "cache" {
            cfg.cache_vdev = Some(Vdev {
                name: name.to_string(),
                status,
                devices: Vec::new(),
            });
            parent = Parent::Cache;
        } else {
            let vdev = match parent {
                Parent::Data(i) => cfg.data_vdevs.get_mut(i),
                Parent::Cache => cfg.cache_vdev.as_mut(),
                Parent::None => None,
            };
            match vdev {
                Some(v) => v.devices.push(name.to_string()),
                None => debug!(device = name, "zpool device without a parent vdev"),
            }
        }
    }
    cfg
}

pub fn read_arcstats(proc_root: &Path) -> Result<ArcCache, ReaderError> {
    let path = proc_root.join("spl/kstat/zfs/arcstats");
    let text = fs::read_to_string(&path).map_err(|e| ReaderError::io(&path, e))?;
    parse_arcstats(&text).map(|stats| arc_cache(&stats))
}

/// kstat table: two header lines, then "name type data".
pub fn parse_arcstats(text: &str) -> Result<HashMap<String, f64>, ReaderError> {
    if text.lines().count() < 3 {
        return Err(ReaderError::malformed("arcstats", "no data rows"));
    }
    let stats = text
        .lines()
        .skip(2)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return None;
            }
            let value = fields[2].parse::<f64>().ok()?;
            Some((fields[0].to_string(), value))
        })
        .collect();
    Ok(stats)
}

/// hits / (hits + misses) as a percentage; 0 when nothing was looked up.
pub fn hit_rate(hits: f64, misses: f64) -> f64 {
    let lookups = hits + misses;
    if lookups > 0.0 {
        (hits * 100.0 / lookups).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn arc_cache(stats: &HashMap<String, f64>) -> ArcCache {
    let stat = |k: &str| stats.get(k).copied().unwrap_or(0.0);
    let gib = |k: &str| format!("{:.1} GB", stat(k) / BYTES_PER_GIB);
    let arc_rate = hit_rate(stat("hits"), stat("misses"));
    let l2_rate = hit_rate(stat("l2_hits"), stat("l2_misses"));
    ArcCache {
        arc_size: gib("size"),
        arc_max_size: gib("c_max"),
        arc_hit_rate: format!("{arc_rate:.1}%"),
        arc_hit_rate_num: arc_rate,
        l2arc_size: gib("l2_size"),
        l2arc_hit_rate: format!("{l2_rate:.1}%"),
    }
}
