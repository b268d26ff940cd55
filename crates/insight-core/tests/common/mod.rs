//! Common test utilities for insight-core tests

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `bytes` to `name` inside a fresh temporary directory
pub fn write_fixture(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    (dir, path)
}
