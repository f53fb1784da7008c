//! 启发式检测器（扩展名黑名单 + 内容正则）
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::rules::{normalize_extension, RuleSet};

/// 编译后的内容规则；`source` 为原始模式文本，用于生成原因
#[derive(Debug, Clone)]
pub(crate) struct ContentPattern {
    pub(crate) source: String,
    pub(crate) regex: Regex,
}

/// 启发式检测器集合
#[derive(Debug, Clone, Default)]
pub struct HeuristicSet {
    extensions: HashSet<String>,
    patterns: Vec<ContentPattern>,
}

impl HeuristicSet {
    /// 从规则集构建；相同模式只保留第一次出现，非法正则直接报错
    pub fn from_rules(rules: &RuleSet) -> Result<Self> {
        let extensions = rules.extensions.iter().filter_map(|e| normalize_extension(e)).collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut patterns = Vec::new();
        for spec in &rules.patterns {
            if !seen.insert(spec.pat.as_str()) {
                continue;
            }
            let regex = Regex::new(&spec.pat).map_err(|source| ScanError::InvalidPattern {
                pattern: spec.pat.clone(),
                source,
            })?;
            patterns.push(ContentPattern { source: spec.pat.clone(), regex });
        }

        Ok(Self { extensions, patterns })
    }

    /// 扩展名检查：命中时返回原因
    pub fn check_extension(&self, path: &Path) -> Option<String> {
        // 路径自身的扩展名只转小写，不做 trim
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if ext.is_empty() {
            return None;
        }
        let ext = format!(".{ext}");
        if self.extensions.contains(&ext) {
            Some(format!("suspicious extension: {ext}"))
        } else {
            None
        }
    }

    /// 内容检查：整读文件，有损解码并转小写后逐条匹配
    /// - 读取失败时静默返回空列表
    pub fn check_content(&self, path: &Path) -> Vec<String> {
        if self.patterns.is_empty() {
            return Vec::new();
        }
        let mut buf = Vec::new();
        let res = File::open(path).and_then(|f| BufReader::new(f).read_to_end(&mut buf));
        if let Err(e) = res {
            debug!(path = %path.display(), error = %e, "content unreadable, skipping content check");
            return Vec::new();
        }
        self.match_bytes(&buf)
    }

    /// 对内存中的字节做内容匹配，每条命中的模式贡献一个原因
    pub fn match_bytes(&self, data: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(data).to_lowercase();
        self.patterns
            .iter()
            .filter(|p| p.regex.is_match(&text))
            .map(|p| format!("suspicious content: {}", p.source))
            .collect()
    }
}
