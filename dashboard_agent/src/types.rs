//! Data types sent to the client over WebSocket.
//! Keep this module minimal and stable: it defines the wire format.

use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub usage: String,
    pub temp: String,
    pub temp_deg: f64,
}

impl Default for CpuInfo {
    fn default() -> Self {
        Self {
            usage: "0%".into(),
            temp: "N/A".into(),
            temp_deg: 0.0,
        }
    }
}

/// Formatted CPU temperature plus the raw Celsius value.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTemp {
    pub display: String,
    pub celsius: f64,
}

impl Default for CpuTemp {
    fn default() -> Self {
        Self {
            display: "N/A".into(),
            celsius: 0.0,
        }
    }
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RamInfo {
    pub used: String,
    pub total: String,
    pub percent: String,
    pub percent_num: f64,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfo {
    pub total: String,
    pub used: String,
    pub free: String,
    pub percent: String,
    pub percent_num: f64,
    pub mount_point: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NetTraffic {
    #[serde(rename = "in")]
    pub rx: String,
    #[serde(rename = "out")]
    pub tx: String,
}

impl Default for NetTraffic {
    fn default() -> Self {
        Self {
            rx: "0.0 Mb/s".into(),
            tx: "0.0 Mb/s".into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct Vdev {
    pub name: String,
    pub status: String,
    pub devices: Vec<String>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZfsConfig {
    pub pool_name: String,
    pub pool_status: String,
    pub data_vdevs: Vec<Vdev>,
    // absent when the pool has no L2ARC device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_vdev: Option<Vdev>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArcCache {
    pub arc_size: String,
    pub arc_max_size: String,
    pub arc_hit_rate: String,
    pub arc_hit_rate_num: f64,
    pub l2arc_size: String,
    pub l2arc_hit_rate: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct SystemInfo {
    pub os: String,
    pub kernel: String,
    pub cpu: String,
    pub uptime: String,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct DockerInfo {
    pub containers: usize,
    pub images: usize,
    pub volumes: usize,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamingInfo {
    pub films: usize,
    pub series: usize,
    pub animes: usize,
    pub playing: usize,
    pub transcoding: usize,
}

/// Entry counts of the three configured library directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryCounts {
    pub films: usize,
    pub series: usize,
    pub animes: usize,
}

/// Active media-server sessions and how many of them are transcoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaSessions {
    pub playing: usize,
    pub transcoding: usize,
}

/// One complete metrics reading, produced once per cycle.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cpu: CpuInfo,
    pub ram: RamInfo,
    pub disk: DiskInfo,
    pub net: NetTraffic,
    pub zfs_config: ZfsConfig,
    pub arc_cache: ArcCache,
    pub system: SystemInfo,
    pub docker: DockerInfo,
    pub streaming: StreamingInfo,
}
