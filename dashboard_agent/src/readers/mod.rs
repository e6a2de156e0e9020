//! Counter readers: one capability per metric family.
//!
//! Every reader reports failure explicitly through `Result`; the aggregator
//! degrades failed families to their documented defaults via [`degrade`],
//! which is also the single place reader failures get logged.

pub mod command;
pub mod cpu;
pub mod disk;
pub mod docker;
pub mod net;
pub mod streaming;
pub mod system;
pub mod zfs;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AgentConfig;
use crate::error::ReaderError;
use crate::state::{CpuSample, NetSample};
use crate::types::{
    ArcCache, CpuTemp, DiskInfo, DockerInfo, LibraryCounts, MediaSessions, RamInfo, SystemInfo,
    ZfsConfig,
};

/// The set of readers a snapshot is assembled from.
///
/// Synchronous methods may block on file or process I/O; the aggregator runs
/// the point-in-time ones off the async executor.
pub trait HostReaders: Send + Sync + 'static {
    /// Cumulative CPU ticks (delta based).
    fn cpu_sample(&self) -> Result<CpuSample, ReaderError>;
    /// Cumulative byte counters of the monitored interface (delta based).
    fn net_sample(&self) -> Result<NetSample, ReaderError>;

    fn cpu_temp(&self) -> Result<CpuTemp, ReaderError>;
    fn ram(&self) -> Result<RamInfo, ReaderError>;
    fn disk(&self) -> Result<DiskInfo, ReaderError>;
    /// Each fact degrades on its own.
    fn system(&self) -> SystemInfo;
    /// Each count degrades to 0 on its own.
    fn docker(&self) -> DockerInfo;
    fn zfs_pool(&self) -> Result<ZfsConfig, ReaderError>;
    fn arc_cache(&self) -> Result<ArcCache, ReaderError>;
    fn library_counts(&self) -> LibraryCounts;
    fn media_sessions(&self) -> impl Future<Output = Result<MediaSessions, ReaderError>> + Send;
}

/// Log a failed read and hand back `None`.
pub fn checked<T>(source: &'static str, res: Result<T, ReaderError>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(ReaderError::NotConfigured(what)) => {
            debug!(source, what, "reader skipped");
            None
        }
        Err(e) => {
            warn!(source, error = %e, "reader degraded");
            None
        }
    }
}

/// Log a failed read and fall back to the family's default value.
pub fn degrade<T: Default>(source: &'static str, res: Result<T, ReaderError>) -> T {
    checked(source, res).unwrap_or_default()
}

/// Filesystem locations the Linux readers consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    pub proc_root: PathBuf,
    pub sys_root: PathBuf,
    pub os_release: PathBuf,
    pub zpool_status: PathBuf,
}

impl HostPaths {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
            os_release: PathBuf::from("/etc/os-release"),
            zpool_status: config.zpool_status_path.clone(),
        }
    }
}

/// Readers backed by procfs, sysfs, local commands and the media server.
pub struct ProcReaders {
    config: Arc<AgentConfig>,
    paths: HostPaths,
    http: reqwest::Client,
}

impl ProcReaders {
    pub fn new(config: Arc<AgentConfig>) -> Result<Self, ReaderError> {
        let paths = HostPaths::from_config(&config);
        Self::with_paths(config, paths)
    }

    pub fn with_paths(config: Arc<AgentConfig>, paths: HostPaths) -> Result<Self, ReaderError> {
        let http = reqwest::Client::builder()
            .timeout(streaming::MEDIA_SERVER_TIMEOUT)
            .build()?;
        Ok(Self {
            config,
            paths,
            http,
        })
    }
}

impl HostReaders for ProcReaders {
    fn cpu_sample(&self) -> Result<CpuSample, ReaderError> {
        cpu::read_cpu_sample(&self.paths.proc_root)
    }

    fn net_sample(&self) -> Result<NetSample, ReaderError> {
        net::read_net_sample(&self.paths.proc_root, &self.config.net_interface)
    }

    fn cpu_temp(&self) -> Result<CpuTemp, ReaderError> {
        cpu::read_cpu_temp(&self.paths.sys_root)
    }

    fn ram(&self) -> Result<RamInfo, ReaderError> {
        cpu::read_ram(&self.paths.proc_root)
    }

    fn disk(&self) -> Result<DiskInfo, ReaderError> {
        disk::read_disk(&self.config.monitor_path())
    }

    fn system(&self) -> SystemInfo {
        let uptime = degrade("uptime", system::read_uptime_secs(&self.paths.proc_root));
        SystemInfo {
            os: checked("os-release", system::read_os_name(&self.paths.os_release))
                .unwrap_or_else(|| system::DEFAULT_OS_NAME.to_string()),
            kernel: degrade("kernel release", system::read_kernel_release()),
            cpu: degrade("cpu model", system::read_cpu_model(&self.paths.proc_root)),
            uptime: system::format_uptime(uptime),
        }
    }

    fn docker(&self) -> DockerInfo {
        DockerInfo {
            containers: degrade("docker containers", docker::count_containers()),
            images: degrade("docker images", docker::count_images()),
            volumes: degrade("docker volumes", docker::count_volumes()),
        }
    }

    fn zfs_pool(&self) -> Result<ZfsConfig, ReaderError> {
        zfs::read_zpool_status(&self.paths.zpool_status)
    }

    fn arc_cache(&self) -> Result<ArcCache, ReaderError> {
        zfs::read_arcstats(&self.paths.proc_root)
    }

    fn library_counts(&self) -> LibraryCounts {
        let count = |source, path: &Option<PathBuf>| {
            degrade(source, streaming::count_entries(path.as_deref()))
        };
        LibraryCounts {
            films: count("films library", &self.config.path_films),
            series: count("series library", &self.config.path_series),
            animes: count("animes library", &self.config.path_animes),
        }
    }

    fn media_sessions(&self) -> impl Future<Output = Result<MediaSessions, ReaderError>> + Send {
        streaming::fetch_sessions(
            &self.http,
            self.config.plex_url.as_deref(),
            self.config.plex_token.as_deref(),
        )
    }
}
