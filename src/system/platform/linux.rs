use super::{CoreTicks, HostQueries, MemoryCounts};
use crate::error::ProbeError;

pub struct Platform;

impl HostQueries for Platform {
    fn per_core_ticks() -> Result<Vec<CoreTicks>, ProbeError> {
        let raw = std::fs::read_to_string("/proc/stat")?;
        parse_per_core_ticks(&raw)
    }

    fn memory_counts() -> Result<MemoryCounts, ProbeError> {
        let raw = std::fs::read_to_string("/proc/meminfo")?;
        parse_memory_counts(&raw)
    }

    fn total_memory_bytes() -> Result<u64, ProbeError> {
        let raw = std::fs::read_to_string("/proc/meminfo")?;
        parse_total_memory(&raw)
    }
}

/// Parses the per-core `cpuN` lines of `/proc/stat`.
///
/// Field order in the file is user, nice, system, idle, ...; we reorder into
/// the `[user, system, idle, nice]` convention shared with the macOS path.
fn parse_per_core_ticks(raw: &str) -> Result<Vec<CoreTicks>, ProbeError> {
    let mut cores = Vec::new();
    for line in raw.lines() {
        let Some(rest) = line.strip_prefix("cpu") else {
            continue;
        };
        // Skip the aggregate "cpu " line; per-core lines are "cpu0", "cpu1", ...
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let fields: Vec<u64> = rest
            .split_whitespace()
            .skip(1)
            .filter_map(|s| s.parse().ok())
            .collect();
        if fields.len() < 4 {
            return Err(ProbeError::Malformed(format!(
                "short cpu line in /proc/stat: `{line}`"
            )));
        }
        cores.push([fields[0], fields[2], fields[3], fields[1]]);
    }
    if cores.is_empty() {
        return Err(ProbeError::Malformed(
            "no per-core cpu lines in /proc/stat".to_string(),
        ));
    }
    Ok(cores)
}

fn parse_memory_counts(raw: &str) -> Result<MemoryCounts, ProbeError> {
    // Unevictable is the closest Linux analogue of wired (pinned) memory.
    let active = meminfo_kib(raw, "Active")?;
    let unevictable = meminfo_kib(raw, "Unevictable")?;
    Ok(MemoryCounts {
        active_bytes: active * 1024,
        wired_bytes: unevictable * 1024,
    })
}

fn parse_total_memory(raw: &str) -> Result<u64, ProbeError> {
    Ok(meminfo_kib(raw, "MemTotal")? * 1024)
}

fn meminfo_kib(raw: &str, key: &str) -> Result<u64, ProbeError> {
    for line in raw.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        if name != key {
            continue;
        }
        return rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| {
                ProbeError::Malformed(format!("unparseable /proc/meminfo line: `{line}`"))
            });
    }
    Err(ProbeError::Malformed(format!(
        "`{key}` missing from /proc/meminfo"
    )))
}
