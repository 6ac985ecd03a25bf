use crate::constants::{DEFAULT_MAX_LISTED_WARNINGS, DEFAULT_SIZE_WARNING_PIXELS};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User-facing merge configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MergeOptions {
    // Input
    /// Descend into subfolders when a folder is picked or dropped
    pub recursive: bool,

    // Output
    /// Replaces the default `<source>/result` folder
    pub output_dir: Option<PathBuf>,
    /// Document Info /Title
    pub title: Option<String>,

    // Size audit
    pub size_warning_pixels: u64,
    pub max_listed_warnings: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            output_dir: None,
            title: None,
            size_warning_pixels: DEFAULT_SIZE_WARNING_PIXELS,
            max_listed_warnings: DEFAULT_MAX_LISTED_WARNINGS,
        }
    }
}

impl MergeOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| AssembleError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AssembleError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.size_warning_pixels == 0 {
            return Err(AssembleError::Config(
                "Size warning threshold must be greater than zero".to_string(),
            ));
        }

        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(AssembleError::Config(format!(
                    "Output folder is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}
