//! 报告输出（JSON，UTF-8，不转义非 ASCII 字符）
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Result, ScanError};
use crate::types::ScanReport;

/// UTC 时间戳，ISO-8601 并以 "Z" 结尾，例如 2025-03-01T08:15:30.123456Z
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// 以缩进格式写出报告；写入失败为致命错误
pub fn write_report(report: &ScanReport, path: &Path) -> Result<()> {
    let write_err = |source| ScanError::ReportWrite { path: path.to_path_buf(), source };

    let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
    serde_json::to_writer_pretty(&mut out, report).map_err(|e| {
        if e.is_io() {
            write_err(e.into())
        } else {
            ScanError::ReportSerialize(e)
        }
    })?;
    out.write_all(b"\n").map_err(write_err)?;
    out.flush().map_err(write_err)?;

    info!(path = %path.display(), "report written");
    Ok(())
}
