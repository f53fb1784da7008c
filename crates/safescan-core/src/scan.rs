//! 扫描主流程：遍历 → 检查 → 隔离 → 汇总
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, ScanError};
use crate::heuristics::HeuristicSet;
use crate::inspector::Inspector;
use crate::options::ScanOptions;
use crate::quarantine::quarantine;
use crate::report::{now_timestamp, write_report};
use crate::rules::{load_rule_set, RuleSet};
use crate::signatures::SignatureStore;
use crate::types::{FileRecord, ScanReport};

/// 加载规则：未指定路径时使用内置规则
fn load_rules(opts: &ScanOptions) -> Result<RuleSet> {
    match &opts.rules_path {
        Some(p) => load_rule_set(p),
        None => Ok(RuleSet::builtin()),
    }
}

/// 扫描目录并返回报告（不落盘）
/// - 根目录不存在或不是目录时，在任何遍历之前返回 `InvalidRoot`
/// - 文件顺序按文件名排序，保证报告可复现
pub fn scan(opts: &ScanOptions) -> Result<ScanReport> {
    if !opts.root.is_dir() {
        return Err(ScanError::InvalidRoot { path: opts.root.clone() });
    }

    let rules = load_rules(opts)?;
    let signatures = SignatureStore::from_signatures(&rules.signatures);
    let heuristics = HeuristicSet::from_rules(&rules)?;
    let inspector = Inspector::new(&signatures, &heuristics);

    info!(root = %opts.root.display(), signatures = signatures.len(), "starting scan");

    let mut total_visited = 0usize;
    let mut findings: Vec<FileRecord> = Vec::new();

    let quarantine_dir = opts.quarantine_dir.as_deref();
    let walker = WalkDir::new(&opts.root)
        .min_depth(1)
        .follow_links(opts.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_quarantine_dir(e, quarantine_dir));

    for entry in walker {
        let path = match entry {
            Ok(e) if is_scannable_file(&e) => e.into_path(),
            Ok(_) => continue,
            Err(e) => match dangling_link(&e) {
                // 跟随链接时悬空链接以错误形式出现，仍按文件计数
                Some(p) => p,
                None => {
                    // 包括 follow_links 下检测到的符号链接环
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            },
        };

        total_visited += 1;
        let mut rec = inspector.inspect(&path);
        if !rec.flagged() {
            continue;
        }

        match quarantine_dir {
            Some(dir) => quarantine(&mut rec, dir),
            None => info!(path = %rec.path.display(), reasons = ?rec.reasons, "suspicious file"),
        }
        findings.push(rec);
    }

    let report = ScanReport::new(now_timestamp(), &opts.root, total_visited, findings);
    info!(total_visited = report.total_visited(), total_flagged = report.total_flagged(), "scan finished");
    Ok(report)
}

/// 扫描并把报告写到 `opts.report_path`
pub fn scan_and_write(opts: &ScanOptions) -> Result<ScanReport> {
    let report = scan(opts)?;
    write_report(&report, &opts.report_path)?;
    Ok(report)
}

/// 非目录条目都算文件；未跟随的符号链接若指向目录则跳过
fn is_scannable_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    if ft.is_dir() {
        return false;
    }
    if ft.is_symlink() {
        return !entry.path().is_dir();
    }
    true
}

/// walkdir 在 follow_links 下对悬空链接报 NotFound；返回该链接路径
fn dangling_link(err: &walkdir::Error) -> Option<PathBuf> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let not_found = err.io_error().map(|e| e.kind()) == Some(std::io::ErrorKind::NotFound);
    let path = err.path()?;
    let is_link = path.symlink_metadata().map(|m| m.file_type().is_symlink()).unwrap_or(false);
    if not_found && is_link {
        Some(path.to_path_buf())
    } else {
        None
    }
}

/// 隔离目录位于扫描根之内时不进入，避免重复检查已隔离的文件
fn is_quarantine_dir(entry: &DirEntry, quarantine_dir: Option<&Path>) -> bool {
    let Some(qdir) = quarantine_dir else { return false };
    if !entry.file_type().is_dir() {
        return false;
    }
    // 隔离目录可能在扫描过程中才被创建，因此每次现取
    match (canonical(entry.path()), canonical(qdir)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn canonical(p: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(p).ok()
}
