//! Snapshot aggregation: delta-based CPU/network rates plus every
//! point-in-time reader, merged into one `Snapshot`.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::warn;

use crate::delta::{format_speed, format_usage, Delta};
use crate::readers::{checked, degrade, HostReaders};
use crate::state::SessionState;
use crate::types::{
    ArcCache, CpuInfo, CpuTemp, DiskInfo, DockerInfo, LibraryCounts, NetTraffic, RamInfo,
    Snapshot, StreamingInfo, SystemInfo, ZfsConfig,
};

pub struct Aggregator<R> {
    readers: Arc<R>,
}

impl<R> Clone for Aggregator<R> {
    fn clone(&self) -> Self {
        Self {
            readers: Arc::clone(&self.readers),
        }
    }
}

// Readings that do not depend on the previous sample.
#[derive(Default)]
struct PointInTime {
    temp: CpuTemp,
    ram: RamInfo,
    disk: DiskInfo,
    system: SystemInfo,
    docker: DockerInfo,
    zfs: ZfsConfig,
    arc: ArcCache,
    library: LibraryCounts,
}

impl PointInTime {
    fn read<R: HostReaders>(readers: &R) -> Self {
        Self {
            temp: degrade("cpu temperature", readers.cpu_temp()),
            ram: degrade("ram", readers.ram()),
            disk: degrade("disk", readers.disk()),
            system: readers.system(),
            docker: readers.docker(),
            zfs: degrade("zpool status", readers.zfs_pool()),
            arc: degrade("arc stats", readers.arc_cache()),
            library: readers.library_counts(),
        }
    }
}

impl<R: HostReaders> Aggregator<R> {
    pub fn new(readers: Arc<R>) -> Self {
        Self { readers }
    }

    /// Initial reading that seeds a new session. Failed samples leave no
    /// baseline rather than a zero one. The timestamp is taken once both
    /// counters are in hand.
    pub async fn baseline(&self) -> SessionState {
        let readers = Arc::clone(&self.readers);
        let samples =
            tokio::task::spawn_blocking(move || (readers.cpu_sample(), readers.net_sample()))
                .await;
        let (cpu, net) = match samples {
            Ok((cpu, net)) => (checked("cpu sample", cpu), checked("net sample", net)),
            Err(e) => {
                warn!(error = %e, "counter sampling did not complete");
                (None, None)
            }
        };
        SessionState {
            cpu,
            net,
            taken_at: Instant::now(),
        }
    }

    /// Build the snapshot for this cycle and the state to keep for the next.
    pub async fn collect(&self, prev: &SessionState) -> (Snapshot, SessionState) {
        // samples first, so the elapsed interval matches the sampling instant
        let next = self.baseline().await;
        let elapsed = next
            .taken_at
            .saturating_duration_since(prev.taken_at)
            .as_secs_f64();

        let usage = match (prev.cpu, next.cpu) {
            (Some(p), Some(c)) => p.rate(&c, elapsed),
            _ => 0.0,
        };
        let net = match (prev.net, next.net) {
            (Some(p), Some(c)) => {
                let r = p.rate(&c, elapsed);
                NetTraffic {
                    rx: format_speed(r.rx_bytes_per_sec),
                    tx: format_speed(r.tx_bytes_per_sec),
                }
            }
            _ => NetTraffic::default(),
        };

        let readers = Arc::clone(&self.readers);
        let (point, sessions) = tokio::join!(
            tokio::task::spawn_blocking(move || PointInTime::read(readers.as_ref())),
            self.readers.media_sessions(),
        );
        let point = point.unwrap_or_else(|e| {
            warn!(error = %e, "point-in-time readers did not complete");
            PointInTime::default()
        });
        let sessions = degrade("media sessions", sessions);

        let snapshot = Snapshot {
            cpu: CpuInfo {
                usage: format_usage(usage),
                temp: point.temp.display,
                temp_deg: point.temp.celsius,
            },
            ram: point.ram,
            disk: point.disk,
            net,
            zfs_config: point.zfs,
            arc_cache: point.arc,
            system: point.system,
            docker: point.docker,
            streaming: StreamingInfo {
                films: point.library.films,
                series: point.library.series,
                animes: point.library.animes,
                playing: sessions.playing,
                transcoding: sessions.transcoding,
            },
        };
        (snapshot, next)
    }
}
