//! 错误类型
//!
//! 只有配置期错误（扫描根、规则文件）与报告写入错误会向上传播；
//! 单文件错误一律记录在 `FileRecord` 上，不会中断遍历。
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("scan root does not exist or is not a directory: {}", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("failed to read rules file: {}", path.display())]
    RulesLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules file: {}", path.display())]
    RulesParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid content pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to write report: {}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report")]
    ReportSerialize(#[from] serde_json::Error),
}
