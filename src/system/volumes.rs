use serde::Serialize;
use sysinfo::Disks;
use tracing::warn;

use crate::error::ProbeError;
use crate::format::bytes_to_gb;

/// Marker excluding the OS's own volumes from enumeration.
pub const SYSTEM_VOLUME_MARKER: &str = "/System";

/// Capacity summary for one mounted, non-system volume.
///
/// Used and free space are derived from capacity and percent rather than
/// stored, so the three can never disagree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolumeInfo {
    pub id: u64,
    pub path: String,
    pub capacity_gb: f64,
    pub percent_used: f64,
}

impl VolumeInfo {
    pub fn used_space_gb(&self) -> f64 {
        self.capacity_gb * self.percent_used / 100.0
    }

    pub fn free_space_gb(&self) -> f64 {
        self.capacity_gb - self.used_space_gb()
    }
}

pub fn is_system_volume(path: &str) -> bool {
    path.contains(SYSTEM_VOLUME_MARKER)
}

/// Enumerates mounted non-system volumes. Intended to run once, at monitor
/// startup; the volume set is not refreshed afterwards.
#[derive(Debug, Default)]
pub struct VolumeProbe;

impl VolumeProbe {
    pub fn new() -> Self {
        VolumeProbe
    }

    pub fn enumerate(&self) -> Vec<VolumeInfo> {
        let disks = Disks::new_with_refreshed_list();
        collect_volumes(disks.list().iter().map(|disk| {
            (
                disk.mount_point().to_string_lossy().into_owned(),
                disk.total_space(),
                disk.available_space(),
            )
        }))
    }
}

/// Builds the volume list from `(path, total_bytes, available_bytes)` triples.
///
/// A volume whose capacity cannot be read is logged and skipped; one bad
/// volume never aborts the rest of the enumeration.
pub fn collect_volumes<I>(parts: I) -> Vec<VolumeInfo>
where
    I: IntoIterator<Item = (String, u64, u64)>,
{
    let mut volumes = Vec::new();
    for (path, total_bytes, available_bytes) in parts {
        if is_system_volume(&path) {
            continue;
        }
        match volume_from_parts(volumes.len() as u64, path, total_bytes, available_bytes) {
            Ok(volume) => volumes.push(volume),
            Err(err) => warn!(error = %err, "skipping volume"),
        }
    }
    volumes
}

fn volume_from_parts(
    id: u64,
    path: String,
    total_bytes: u64,
    available_bytes: u64,
) -> Result<VolumeInfo, ProbeError> {
    if total_bytes == 0 {
        return Err(ProbeError::UnreadableVolume { path });
    }
    let capacity_gb = bytes_to_gb(total_bytes);
    let available_gb = bytes_to_gb(available_bytes.min(total_bytes));
    let percent_used = (capacity_gb - available_gb) / capacity_gb * 100.0;
    Ok(VolumeInfo {
        id,
        path,
        capacity_gb,
        percent_used,
    })
}
