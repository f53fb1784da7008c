//! 已知摘要签名库（只读，启动时构建一次）
use std::collections::HashMap;

use crate::rules::Signature;

/// 摘要 → 威胁名称，仅做精确匹配
#[derive(Debug, Clone, Default)]
pub struct SignatureStore {
    by_digest: HashMap<String, String>,
}

impl SignatureStore {
    /// 后出现的同摘要条目覆盖先出现的
    pub fn from_signatures(sigs: &[Signature]) -> Self {
        let by_digest = sigs.iter().map(|s| (s.digest.clone(), s.label.clone())).collect();
        Self { by_digest }
    }

    pub fn lookup(&self, digest: &str) -> Option<&str> {
        self.by_digest.get(digest).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_digest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_digest.is_empty()
    }
}
