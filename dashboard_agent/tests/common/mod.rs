//! Scripted reader set shared by the integration tests.
#![allow(dead_code)]

use std::future::{ready, Future};
use std::sync::Mutex;

use dashboard_agent::error::ReaderError;
use dashboard_agent::readers::HostReaders;
use dashboard_agent::state::{CpuSample, NetSample};
use dashboard_agent::types::{
    ArcCache, CpuTemp, DiskInfo, DockerInfo, LibraryCounts, MediaSessions, RamInfo, SystemInfo,
    Vdev, ZfsConfig,
};

type Feed<T> = Mutex<Box<dyn Iterator<Item = Option<T>> + Send>>;

pub fn cpu(idle: u64, total: u64) -> CpuSample {
    CpuSample {
        idle_ticks: idle,
        total_ticks: total,
    }
}

pub fn net(rx: u64, tx: u64) -> NetSample {
    NetSample {
        rx_bytes: rx,
        tx_bytes: tx,
    }
}

/// Counter samples come from per-family feeds (`None` = failed read);
/// every point-in-time reader returns a fixed value, or fails when `broken`.
pub struct FakeReaders {
    cpu: Feed<CpuSample>,
    net: Feed<NetSample>,
    broken: bool,
}

impl FakeReaders {
    /// Samples in order; the last one repeats once the script runs out.
    pub fn scripted(cpu: Vec<Option<CpuSample>>, net: Vec<Option<NetSample>>) -> Self {
        Self::from_feeds(sticky(cpu), sticky(net))
    }

    /// Endless counters where every step is 50 idle out of 100 total ticks,
    /// so any two samples in order read as 50% busy.
    pub fn ticking() -> Self {
        Self::from_feeds(
            (1u64..).map(|i| Some(cpu(50 * i, 100 * i))),
            (1u64..).map(|i| Some(net(1_000 * i, 500 * i))),
        )
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    fn from_feeds<C, N>(cpu: C, net: N) -> Self
    where
        C: Iterator<Item = Option<CpuSample>> + Send + 'static,
        N: Iterator<Item = Option<NetSample>> + Send + 'static,
    {
        Self {
            cpu: Mutex::new(Box::new(cpu)),
            net: Mutex::new(Box::new(net)),
            broken: false,
        }
    }

    fn or_broken<T>(&self, value: T) -> Result<T, ReaderError> {
        if self.broken {
            Err(ReaderError::malformed("fake", "broken on purpose"))
        } else {
            Ok(value)
        }
    }
}

fn sticky<T: Clone + Send + 'static>(v: Vec<T>) -> impl Iterator<Item = T> + Send {
    let last = v.last().cloned();
    v.into_iter().chain(std::iter::from_fn(move || last.clone()))
}

fn next<T>(feed: &Feed<T>, what: &'static str) -> Result<T, ReaderError> {
    feed.lock()
        .unwrap()
        .next()
        .flatten()
        .ok_or_else(|| ReaderError::malformed(what, "scripted failure"))
}

impl HostReaders for FakeReaders {
    fn cpu_sample(&self) -> Result<CpuSample, ReaderError> {
        next(&self.cpu, "cpu sample")
    }

    fn net_sample(&self) -> Result<NetSample, ReaderError> {
        next(&self.net, "net sample")
    }

    fn cpu_temp(&self) -> Result<CpuTemp, ReaderError> {
        self.or_broken(CpuTemp {
            display: "51.2°C".into(),
            celsius: 51.2,
        })
    }

    fn ram(&self) -> Result<RamInfo, ReaderError> {
        self.or_broken(RamInfo {
            used: "12.0 GB".into(),
            total: "16.0 GB".into(),
            percent: "75.0%".into(),
            percent_num: 75.0,
        })
    }

    fn disk(&self) -> Result<DiskInfo, ReaderError> {
        self.or_broken(DiskInfo {
            total: "8.0 TB".into(),
            used: "4.5 TB".into(),
            free: "3.5 TB".into(),
            percent: "57%".into(),
            percent_num: 57.0,
            mount_point: "/mnt/tank".into(),
        })
    }

    fn system(&self) -> SystemInfo {
        SystemInfo {
            os: "Unraid OS".into(),
            kernel: "6.1.106-Unraid".into(),
            cpu: "Test CPU".into(),
            uptime: "1d 2h 3m".into(),
        }
    }

    fn docker(&self) -> DockerInfo {
        DockerInfo {
            containers: 12,
            images: 30,
            volumes: 4,
        }
    }

    fn zfs_pool(&self) -> Result<ZfsConfig, ReaderError> {
        self.or_broken(ZfsConfig {
            pool_name: "tank".into(),
            pool_status: "ONLINE".into(),
            data_vdevs: vec![Vdev {
                name: "raidz1-0".into(),
                status: "ONLINE".into(),
                devices: vec!["sda".into(), "sdb".into(), "sdc".into()],
            }],
            cache_vdev: None,
        })
    }

    fn arc_cache(&self) -> Result<ArcCache, ReaderError> {
        self.or_broken(ArcCache {
            arc_size: "4.0 GB".into(),
            arc_max_size: "8.0 GB".into(),
            arc_hit_rate: "90.0%".into(),
            arc_hit_rate_num: 90.0,
            l2arc_size: "0.0 GB".into(),
            l2arc_hit_rate: "0.0%".into(),
        })
    }

    fn library_counts(&self) -> LibraryCounts {
        LibraryCounts {
            films: 120,
            series: 40,
            animes: 7,
        }
    }

    fn media_sessions(&self) -> impl Future<Output = Result<MediaSessions, ReaderError>> + Send {
        ready(self.or_broken(MediaSessions {
            playing: 2,
            transcoding: 1,
        }))
    }
}
