//! 公共类型（对外暴露）
//!
//! 报告字段名沿用既有 `rapor.json` 的格式，其他工具依赖这些名字，不可随意更改。
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 单个文件的检查结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// 文件大小；stat 失败时为 None
    pub size: Option<u64>,
    /// MD5 摘要；读取失败时为 None
    pub digest: Option<String>,
    pub hash_matched: bool,
    pub extension_matched: bool,
    pub content_matched: bool,
    /// 按检查顺序排列的命中原因
    pub reasons: Vec<String>,
    /// 隔离成功后的目标路径
    pub quarantined_to: Option<PathBuf>,
    /// 隔离失败等单文件错误
    pub error: Option<String>,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    /// 任一检测项命中即视为可疑
    pub fn flagged(&self) -> bool {
        self.hash_matched || self.extension_matched || self.content_matched
    }
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// 手写序列化：`supheli` 始终由三个标志推导，路径按有损方式转为字符串
impl Serialize for FileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut n = 8;
        if self.quarantined_to.is_some() { n += 1; }
        if self.error.is_some() { n += 1; }

        let mut st = serializer.serialize_struct("FileRecord", n)?;
        st.serialize_field("yol", &lossy(&self.path))?;
        st.serialize_field("boyut", &self.size)?;
        st.serialize_field("md5", &self.digest)?;
        st.serialize_field("sifreli_hash", &self.hash_matched)?;
        st.serialize_field("supheli_ext", &self.extension_matched)?;
        st.serialize_field("supheli_icerik", &self.content_matched)?;
        st.serialize_field("nedenler", &self.reasons)?;
        st.serialize_field("supheli", &self.flagged())?;
        match &self.quarantined_to {
            Some(dst) => st.serialize_field("karantinaya_taşındı", &lossy(dst))?,
            None => st.skip_field("karantinaya_taşındı")?,
        }
        match &self.error {
            Some(e) => st.serialize_field("hata", e)?,
            None => st.skip_field("hata")?,
        }
        st.end()
    }
}

/// 一次扫描的汇总报告（对应 rapor.json 顶层对象）
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    #[serde(rename = "tarama_zamani")]
    timestamp: String,
    #[serde(rename = "taranan_kok")]
    root: String,
    #[serde(rename = "toplam_tarandi")]
    total_visited: usize,
    #[serde(rename = "bulunan_supheli")]
    total_flagged: usize,
    #[serde(rename = "bulgular")]
    findings: Vec<FileRecord>,
}

impl ScanReport {
    /// 组装报告；`total_flagged` 总是等于 findings 的长度
    pub fn new(timestamp: String, root: &Path, total_visited: usize, findings: Vec<FileRecord>) -> Self {
        Self {
            timestamp,
            root: lossy(root),
            total_visited,
            total_flagged: findings.len(),
            findings,
        }
    }

    pub fn timestamp(&self) -> &str { &self.timestamp }
    pub fn root(&self) -> &str { &self.root }
    pub fn total_visited(&self) -> usize { self.total_visited }
    pub fn total_flagged(&self) -> usize { self.total_flagged }
    pub fn findings(&self) -> &[FileRecord] { &self.findings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_follows_match_flags() {
        let mut rec = FileRecord::new("/tmp/a.txt");
        assert!(!rec.flagged());
        rec.content_matched = true;
        assert!(rec.flagged());
        rec.content_matched = false;
        rec.extension_matched = true;
        assert!(rec.flagged());
    }

    #[test]
    fn record_serializes_with_report_field_names() {
        let mut rec = FileRecord::new("/tmp/x.exe");
        rec.size = Some(3);
        rec.extension_matched = true;
        rec.reasons.push("suspicious extension: .exe".into());

        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["yol"], "/tmp/x.exe");
        assert_eq!(v["boyut"], 3);
        assert!(v["md5"].is_null());
        assert_eq!(v["supheli_ext"], true);
        assert_eq!(v["supheli"], true);
        assert!(v.get("karantinaya_taşındı").is_none());
        assert!(v.get("hata").is_none());
    }

    #[test]
    fn record_includes_quarantine_outcome_when_present() {
        let mut rec = FileRecord::new("/tmp/x.js");
        rec.quarantined_to = Some(PathBuf::from("/q/x.js"));
        rec.error = Some("boom".into());

        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["karantinaya_taşındı"], "/q/x.js");
        assert_eq!(v["hata"], "boom");
    }

    #[test]
    fn report_counts_findings() {
        let mut a = FileRecord::new("a.bat");
        a.extension_matched = true;
        let report = ScanReport::new("2025-01-01T00:00:00.000000Z".into(), Path::new("/data"), 5, vec![a]);
        assert_eq!(report.total_flagged(), 1);

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["taranan_kok"], "/data");
        assert_eq!(v["toplam_tarandi"], 5);
        assert_eq!(v["bulunan_supheli"], 1);
        assert_eq!(v["bulgular"].as_array().unwrap().len(), 1);
    }
}
