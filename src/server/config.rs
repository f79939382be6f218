use std::path::{Path, PathBuf};

pub const DEFAULT_BUSY_TIMEOUT_MS: i64 = 5000;

/// How a database should be opened. File-backed databases live in a
/// directory named after the database under `base_path`; in-memory
/// databases are shared process-wide by name.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub name: String,
    pub base_path: PathBuf,
    pub in_memory: bool,
    pub read_only: bool,
    pub busy_timeout_ms: i64,
}

impl DatabaseConfig {
    pub fn new(name: &str, base_path: &Path) -> Self {
        DatabaseConfig {
            name: name.to_string(),
            base_path: base_path.to_path_buf(),
            in_memory: false,
            read_only: false,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn new_in_memory(name: &str) -> Self {
        DatabaseConfig {
            name: name.to_string(),
            base_path: PathBuf::new(),
            in_memory: true,
            read_only: false,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.base_path.join(&self.name)
    }
}
