/// Test utilities for storage tests backed by a temporary directory
///
/// The temporary directory is removed when the environment is dropped, even
/// if the test panics.
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::yaml_session_repository::YamlSessionRepository;

pub struct TestEnvironment {
    /// Kept alive so the directory is only removed on drop
    _temp_dir: TempDir,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        Ok(Self { _temp_dir: temp_dir, base_path })
    }

    pub fn session_file(&self) -> PathBuf {
        self.base_path.join("session.yaml")
    }

    pub fn session_repository(&self) -> YamlSessionRepository {
        YamlSessionRepository::new(self.session_file())
    }
}
