//! Integrity snapshots for output files (byte length + SHA-512).
//!
//! Captured on demand at render time so the manifest always reflects the
//! current on-disk bytes; nothing is cached across runs.

use anyhow::{Context, Result};
use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Buffer size used when streaming file contents through the digest.
const CHECKSUM_BUFFER_SIZE: usize = 8192;

/// Captured file information for one manifest output entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
    pub sha512: String,
}

impl FileInfo {
    /// Read `path` once, accumulating its byte length and SHA-512 digest.
    ///
    /// The digest is rendered as lowercase hex with no separators, the form
    /// the buildinfo format requires.
    pub fn capture(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening file for checksumming '{}'", path.display()))?;
        let mut reader = BufReader::new(file);
        let mut hasher = Sha512::new();
        let mut buf = [0u8; CHECKSUM_BUFFER_SIZE];
        let mut size = 0u64;
        loop {
            let n = reader
                .read(&mut buf)
                .with_context(|| format!("reading file for checksumming '{}'", path.display()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            size += n as u64;
        }
        Ok(FileInfo {
            path: path.to_path_buf(),
            size,
            sha512: format!("{:x}", hasher.finalize()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";
    const HELLO_SHA512: &str = "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca72323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043";
    // 20000 'a' bytes, spanning several 8192-byte buffer reads.
    const MULTI_CHUNK_SHA512: &str = "4ac47b5804bb5178ecdca52aeceb71341d2f1f2b3e9fc622183920fde1ef16e17bc8b6ac49819968cdf8d122c8450afd74c0d482ec4068254fb13bd50f5551bf";

    #[test]
    fn captures_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        let info = FileInfo::capture(&path).unwrap();
        assert_eq!(info.size, 0);
        assert_eq!(info.sha512, EMPTY_SHA512);
    }

    #[test]
    fn captures_single_chunk_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hello.bin");
        fs::write(&path, b"hello").unwrap();

        let info = FileInfo::capture(&path).unwrap();
        assert_eq!(info.size, 5);
        assert_eq!(info.sha512, HELLO_SHA512);
    }

    #[test]
    fn captures_multi_chunk_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.bin");
        fs::write(&path, "a".repeat(20000)).unwrap();

        let info = FileInfo::capture(&path).unwrap();
        assert_eq!(info.size, 20000);
        assert_eq!(info.sha512, MULTI_CHUNK_SHA512);
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.bin");

        let err = FileInfo::capture(&path).unwrap_err();
        assert!(err.to_string().contains("absent.bin"));
    }
}
