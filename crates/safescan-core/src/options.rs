//! 扫描选项（模块）
use std::path::PathBuf;

/// 默认报告文件名
pub const DEFAULT_REPORT_PATH: &str = "rapor.json";

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 扫描根目录
    pub root: PathBuf,
    /// 隔离目录；为空则只报告、不移动文件
    pub quarantine_dir: Option<PathBuf>,
    /// 报告输出路径（JSON）
    pub report_path: PathBuf,
    /// 规则文件路径（TOML）；为空则使用内置规则
    pub rules_path: Option<PathBuf>,
    /// 是否跟随符号链接进入目录（开启后由 walkdir 做环路检测）
    pub follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            quarantine_dir: None,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            rules_path: None,
            follow_links: false,
        }
    }
}
