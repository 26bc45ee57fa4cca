#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::TokenStore;

/// Keeps the credential token in a single file, readable only by the owner
/// on unix.
pub struct FileTokenStore {
    pub file_path: PathBuf,
}

impl Default for FileTokenStore {
    fn default() -> FileTokenStore {
        return FileTokenStore::new(PathBuf::from(Config::get(ConfigKey::TokenFile)));
    }
}

impl FileTokenStore {
    pub fn new(file_path: PathBuf) -> FileTokenStore {
        return FileTokenStore { file_path };
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.file_path)?;
        let token = contents.trim();
        if token.is_empty() {
            return Ok(None);
        }

        return Ok(Some(token.to_string()));
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).truncate(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.file_path)?;
        file.write_all(token.as_bytes())?;
        file.flush()?;

        tracing::debug!(path = ?self.file_path, "Stored token");
        return Ok(());
    }

    fn remove(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path)?;
        tracing::debug!(path = ?self.file_path, "Removed token");
        return Ok(());
    }
}
