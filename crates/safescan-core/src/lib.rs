//! 本地文件扫描核心库
//!
//! 三类独立检测：已知摘要（MD5）签名、扩展名黑名单、内容正则。
//! 命中文件可选地移入隔离目录，最终汇总为一份 JSON 报告。
//! 单文件错误只记录在结果中，不会中断整个扫描。

mod error;
mod options;
mod types;
mod hasher;
mod rules;
mod signatures;
mod heuristics;
mod inspector;
mod quarantine;
mod report;
mod scan;

pub use error::{Result, ScanError};
pub use options::{ScanOptions, DEFAULT_REPORT_PATH};
pub use types::{FileRecord, ScanReport};
pub use hasher::{hash_bytes, hash_file};
pub use rules::{load_rule_set, PatternSpec, RuleSet, Signature};
pub use signatures::SignatureStore;
pub use heuristics::HeuristicSet;
pub use inspector::Inspector;
pub use quarantine::{quarantine, relocate};
pub use report::{format_timestamp, now_timestamp, write_report};
pub use scan::{scan, scan_and_write};
