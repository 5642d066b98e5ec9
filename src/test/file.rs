use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

/// Writes an executable shell script that stands in for the archiver.
pub fn fake_tool(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("fake-7zr");
    fs_err::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    fs_err::set_permissions(&path, Permissions::from_mode(0o755)).unwrap();
    path
}
