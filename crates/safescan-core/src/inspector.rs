//! 单文件检查：摘要签名 + 扩展名 + 内容
use std::path::Path;

use tracing::debug;

use crate::hasher::hash_file;
use crate::heuristics::HeuristicSet;
use crate::signatures::SignatureStore;
use crate::types::FileRecord;

/// 组合签名库与启发式集合，对单个文件给出结论；不会移动或删除文件
pub struct Inspector<'a> {
    signatures: &'a SignatureStore,
    heuristics: &'a HeuristicSet,
}

impl<'a> Inspector<'a> {
    pub fn new(signatures: &'a SignatureStore, heuristics: &'a HeuristicSet) -> Self {
        Self { signatures, heuristics }
    }

    pub fn inspect(&self, path: &Path) -> FileRecord {
        let mut rec = FileRecord::new(path);

        // 连大小都拿不到的文件不再做任何检查
        match std::fs::metadata(path) {
            Ok(md) => {
                rec.size = Some(md.len());
                // FIFO、socket、设备节点等打开或读取可能阻塞，不做内容检查
                if !md.is_file() {
                    debug!(path = %path.display(), "not a regular file, skipping inspection");
                    rec.error = Some("not a regular file".to_string());
                    return rec;
                }
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "stat failed, skipping inspection");
                return rec;
            }
        }

        match hash_file(path) {
            Ok(digest) => {
                if let Some(label) = self.signatures.lookup(&digest) {
                    rec.hash_matched = true;
                    rec.reasons.push(format!("known hash: {label}"));
                }
                rec.digest = Some(digest);
            }
            Err(e) => debug!(path = %path.display(), error = %e, "digest not computable"),
        }

        if let Some(reason) = self.heuristics.check_extension(path) {
            rec.extension_matched = true;
            rec.reasons.push(reason);
        }

        let content = self.heuristics.check_content(path);
        if !content.is_empty() {
            rec.content_matched = true;
            rec.reasons.extend(content);
        }

        debug!(path = %path.display(), flagged = rec.flagged(), "inspected");
        rec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use std::fs;

    fn fixtures() -> (SignatureStore, HeuristicSet) {
        let rules = RuleSet::builtin();
        (
            SignatureStore::from_signatures(&rules.signatures),
            HeuristicSet::from_rules(&rules).unwrap(),
        )
    }

    #[test]
    fn zero_byte_file_matches_known_signature() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("empty.dat");
        fs::write(&p, b"").unwrap();

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert_eq!(rec.size, Some(0));
        assert_eq!(rec.digest.as_deref(), Some("d41d8cd98f00b204e9800998ecf8427e"));
        assert!(rec.hash_matched);
        assert!(rec.flagged());
        assert_eq!(rec.reasons, vec!["known hash: Ornek-Malware-Boş".to_string()]);
    }

    #[test]
    fn non_empty_file_matches_second_signature() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("blob.bin");
        fs::write(&p, b"abcd").unwrap();

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert_eq!(rec.digest.as_deref(), Some("e2fc714c4727ee9395f324cd2e7f331f"));
        assert!(rec.hash_matched);
        assert_eq!(rec.reasons, vec!["known hash: Ornek-Malware-Test".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn fifo_is_not_opened() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("pipe.exe");
        let status = std::process::Command::new("mkfifo").arg(&p).status().unwrap();
        assert!(status.success());

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert!(rec.size.is_some());
        assert_eq!(rec.digest, None);
        assert_eq!(rec.error.as_deref(), Some("not a regular file"));
        assert!(!rec.flagged());
    }

    #[test]
    fn exe_with_benign_content() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("sample.exe");
        fs::write(&p, b"just some harmless bytes").unwrap();

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert!(rec.extension_matched);
        assert!(!rec.hash_matched);
        assert!(!rec.content_matched);
        assert!(rec.flagged());
    }

    #[test]
    fn mixed_case_powershell_in_text() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("notes.txt");
        fs::write(&p, b"run PoWeRsHeLl -nop").unwrap();

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert!(rec.content_matched);
        assert!(rec.flagged());
        assert_eq!(rec.reasons, vec!["suspicious content: powershell".to_string()]);
    }

    #[test]
    fn reasons_follow_check_order() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("dropper.js");
        fs::write(&p, b"eval(atob(base64))").unwrap();

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert_eq!(
            rec.reasons,
            vec![
                "suspicious extension: .js".to_string(),
                r"suspicious content: eval\(".to_string(),
                "suspicious content: base64".to_string(),
            ]
        );
    }

    #[test]
    fn clean_file_is_not_flagged() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("readme.md");
        fs::write(&p, b"nothing to see").unwrap();

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert!(!rec.flagged());
        assert!(rec.reasons.is_empty());
        assert!(rec.digest.is_some());
    }

    #[test]
    fn missing_file_yields_empty_record() {
        let (sigs, heur) = fixtures();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("vanished.exe");

        let rec = Inspector::new(&sigs, &heur).inspect(&p);
        assert_eq!(rec.size, None);
        assert_eq!(rec.digest, None);
        // 扩展名检查也被跳过
        assert!(!rec.flagged());
    }
}
