//! 文件摘要（MD5，分块流式读取）
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// 读取块大小（64 KiB）
pub(crate) const BLOCK_SIZE: usize = 64 * 1024;

/// 分块计算文件的 MD5，返回小写十六进制串
/// - 任意 I/O 错误原样返回，由调用方决定如何记录
pub fn hash_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(BLOCK_SIZE, file);
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; BLOCK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}
