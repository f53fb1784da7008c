//! 隔离：把可疑文件按原文件名平铺移动到隔离目录
//!
//! 同名文件后写覆盖先写（last-write-wins）。
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::types::FileRecord;

/// 移动单个文件到 `dir`，返回目标路径
/// - 目录不存在时递归创建（幂等）
/// - 先尝试 rename；失败（如跨设备）时退回 copy + remove，拷贝失败不留残片
/// - 任一步失败都保证源文件留在原处
pub fn relocate(src: &Path, dir: &Path) -> io::Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("no file name in {}", src.display()))
    })?;
    fs::create_dir_all(dir)?;
    let dst = dir.join(name);

    if fs::rename(src, &dst).is_ok() {
        return Ok(dst);
    }

    // 先拷到同目录的临时名，完整写完后再覆盖目标，半截拷贝不会顶掉旧文件
    let mut staging = OsString::from(".");
    staging.push(name);
    staging.push(".partial");
    let staging = dir.join(staging);
    if let Err(e) = fs::copy(src, &staging).and_then(|_| fs::rename(&staging, &dst)) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    if let Err(e) = fs::remove_file(src) {
        // 源文件删不掉时撤销拷贝，避免留下两份
        let _ = fs::remove_file(&dst);
        return Err(e);
    }
    Ok(dst)
}

/// 隔离一条记录对应的文件，并把结果写回记录
pub fn quarantine(rec: &mut FileRecord, dir: &Path) {
    match relocate(&rec.path, dir) {
        Ok(dst) => {
            info!(from = %rec.path.display(), to = %dst.display(), "quarantined");
            rec.quarantined_to = Some(dst);
        }
        Err(e) => {
            warn!(path = %rec.path.display(), error = %e, "quarantine failed");
            rec.error = Some(e.to_string());
        }
    }
}
