//! Unix filesystem operations

use crate::error::Result;
use crate::platform::traits::FilesystemOps;
use nix::unistd::{access, AccessFlags};
use std::fs;
use std::path::Path;

pub struct UnixFilesystem;

impl UnixFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnixFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FilesystemOps for UnixFilesystem {
    fn is_executable(&self, path: &Path) -> bool {
        match path.metadata() {
            Ok(metadata) if metadata.is_file() => access(path, AccessFlags::X_OK).is_ok(),
            _ => false,
        }
    }

    fn contains_text(&self, path: &Path, needle: &str) -> Result<bool> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(content.contains(needle))
    }
}
