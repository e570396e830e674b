use crate::migration;
use crate::model::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML file store for `Settings`
///
/// Reads run through the format migration; writes always use the current format.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load settings, or empty settings when the file does not exist yet
    pub fn load(&self) -> Result<Settings> {
        if !self.file_path.exists() {
            log::debug!("{} not found, starting empty", self.file_path.display());
            return Ok(Settings::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let settings = migration::settings_from_toml(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        log::debug!(
            "loaded {} schedule(s) from {}",
            settings.schedules.len(),
            self.file_path.display()
        );
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let content = toml::to_string_pretty(settings)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        log::debug!("saved {}", self.file_path.display());
        Ok(())
    }
}
