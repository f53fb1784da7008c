//! 规则文件加载（TOML）
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, ScanError};

/// 单条签名（摘要 → 威胁名称）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Signature {
    pub digest: String,
    pub label: String,
}

/// 单条内容规则（支持 pattern 或 regex 字段）
#[derive(Debug, Clone, Deserialize)]
struct PatternEntry {
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    regex: Option<String>,
}

/// 顶层规则文件结构
#[derive(Debug, Clone, Default, Deserialize)]
struct RuleFile {
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    signatures: Vec<Signature>,
    #[serde(default)]
    patterns: Vec<PatternEntry>,
}

/// 归一化后的内容规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    pub pat: String,
}

/// 归一化后的完整规则集
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub signatures: Vec<Signature>,
    /// 小写、带前导点，例如 ".exe"
    pub extensions: Vec<String>,
    pub patterns: Vec<PatternSpec>,
}

impl RuleSet {
    /// 内置规则，与仓库中的 rules/default.toml 保持一致
    pub fn builtin() -> Self {
        let sig = |digest: &str, label: &str| Signature { digest: digest.into(), label: label.into() };
        let pat = |pat: &str| PatternSpec { pat: pat.into() };
        Self {
            signatures: vec![
                sig("d41d8cd98f00b204e9800998ecf8427e", "Ornek-Malware-Boş"),
                sig("e2fc714c4727ee9395f324cd2e7f331f", "Ornek-Malware-Test"),
            ],
            extensions: [".exe", ".js", ".vbs", ".bat"].iter().map(|s| s.to_string()).collect(),
            patterns: vec![
                pat(r"eval\("),
                pat("base64"),
                pat("powershell"),
            ],
        }
    }

    /// 从 TOML 文本解析；`origin` 仅用于错误信息
    pub fn from_toml_str(txt: &str, origin: &Path) -> Result<Self> {
        let parsed: RuleFile = toml::from_str(txt).map_err(|source| ScanError::RulesParse {
            path: origin.to_path_buf(),
            source,
        })?;

        let signatures = parsed
            .signatures
            .into_iter()
            .map(|s| Signature { digest: s.digest.trim().to_ascii_lowercase(), label: s.label })
            .collect();

        let extensions = parsed.extensions.iter().filter_map(|e| normalize_extension(e)).collect();

        let mut patterns = Vec::new();
        for e in parsed.patterns {
            // 兼容两种字段名：pattern 或 regex
            let pat = match (e.pattern, e.regex) {
                (Some(p), _) => p,
                (None, Some(r)) => r,
                _ => continue,
            };
            patterns.push(PatternSpec { pat });
        }

        Ok(Self { signatures, extensions, patterns })
    }
}

/// 从 TOML 规则文件加载
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let txt = std::fs::read_to_string(path).map_err(|source| ScanError::RulesLoad {
        path: path.to_path_buf(),
        source,
    })?;
    RuleSet::from_toml_str(&txt, path)
}

/// "EXE" / ".Exe" → ".exe"；空串返回 None
pub(crate) fn normalize_extension(ext: &str) -> Option<String> {
    let e = ext.trim().trim_start_matches('.');
    if e.is_empty() {
        return None;
    }
    Some(format!(".{}", e.to_lowercase()))
}
