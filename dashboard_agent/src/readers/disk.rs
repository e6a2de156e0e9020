use std::path::Path;

use crate::error::ReaderError;
use crate::readers::command::run_command;
use crate::types::DiskInfo;

const KIB_PER_TIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn read_disk(monitor_path: &Path) -> Result<DiskInfo, ReaderError> {
    let path = monitor_path.to_string_lossy();
    let out = run_command("df", &["-Pk", path.as_ref()])?;
    parse_df(&out)
}

/// Second line of `df -Pk`: "filesystem total used free percent mountpoint".
pub fn parse_df(out: &str) -> Result<DiskInfo, ReaderError> {
    let line = out
        .lines()
        .nth(1)
        .ok_or_else(|| ReaderError::malformed("df output", "fewer than two lines"))?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return Err(ReaderError::malformed(
            "df output",
            format!("expected 6 fields, got {}", fields.len()),
        ));
    }
    let kib = |tok: &str| {
        tok.parse::<f64>()
            .map_err(|_| ReaderError::malformed("df output", format!("bad size {tok:?}")))
    };
    let total = kib(fields[1])?;
    let used = kib(fields[2])?;
    let free = kib(fields[3])?;
    let percent_num = fields[4]
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| ReaderError::malformed("df output", format!("bad percent {:?}", fields[4])))?;

    Ok(DiskInfo {
        total: format!("{:.1} TB", total / KIB_PER_TIB),
        used: format!("{:.1} TB", used / KIB_PER_TIB),
        free: format!("{:.1} TB", free / KIB_PER_TIB),
        percent: fields[4].to_string(),
        percent_num: percent_num.clamp(0.0, 100.0),
        // mount points may contain spaces
        mount_point: fields[5..].join(" "),
    })
}
