//! Configuration types for workspace indexing and preview rendering.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Default maximum size for an indexable note (bytes).
const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Configuration for a notes workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Path to the workspace root directory
    pub root: PathBuf,
    /// File extensions treated as notes (without the dot)
    pub allowed_extensions: HashSet<String>,
    /// Directory names skipped during scanning
    pub excluded_paths: HashSet<String>,
    /// Maximum note size in bytes; larger files are skipped
    pub max_file_size: u64,
}

impl WorkspaceConfig {
    /// Create a config for the given root with default scanning rules
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            allowed_extensions: ["md", "markdown"].iter().map(|s| s.to_string()).collect(),
            excluded_paths: [".git", ".foam", ".obsidian", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Create a new workspace config with builder
    pub fn builder(root: impl Into<PathBuf>) -> WorkspaceConfigBuilder {
        WorkspaceConfigBuilder::new(root)
    }

    /// Validate the workspace configuration
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(Error::config_error(format!(
                "Workspace root does not exist: {}",
                self.root.display()
            )));
        }

        if !self.root.is_dir() {
            return Err(Error::config_error(format!(
                "Workspace root is not a directory: {}",
                self.root.display()
            )));
        }

        if self.allowed_extensions.is_empty() {
            return Err(Error::config_error(
                "At least one allowed extension is required",
            ));
        }

        Ok(())
    }
}

/// Builder for WorkspaceConfig
pub struct WorkspaceConfigBuilder {
    config: WorkspaceConfig,
}

impl WorkspaceConfigBuilder {
    /// Create a new builder
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: WorkspaceConfig::new(root),
        }
    }

    /// Replace the allowed extension set
    pub fn allowed_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.config.allowed_extensions = extensions.into_iter().collect();
        self
    }

    /// Add a directory name to skip during scanning
    pub fn exclude_path(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_paths.insert(name.into());
        self
    }

    /// Set the maximum indexable note size
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Finish building
    pub fn build(self) -> WorkspaceConfig {
        self.config
    }
}

/// Slicing policy for section-scoped transclusion.
///
/// Section ranges are half-open `[start, end)`; an index implementation with
/// inclusive end lines can be accommodated without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SectionSlicing {
    /// The end line is not part of the section
    #[default]
    EndExclusive,
    /// The end line is part of the section
    EndInclusive,
}

/// Configuration for the preview rendering pipeline
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    /// How section line ranges are interpreted when slicing included notes
    pub section_slicing: SectionSlicing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkspaceConfig::new("/notes");
        assert!(config.allowed_extensions.contains("md"));
        assert!(config.excluded_paths.contains(".git"));
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_builder() {
        let config = WorkspaceConfig::builder("/notes")
            .allowed_extensions(["md".to_string()])
            .exclude_path("archive")
            .max_file_size(1024)
            .build();
        assert_eq!(config.allowed_extensions.len(), 1);
        assert!(config.excluded_paths.contains("archive"));
        assert_eq!(config.max_file_size, 1024);
    }

    #[test]
    fn test_validate_missing_root() {
        let config = WorkspaceConfig::new("/does/not/exist");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkspaceConfig::new(dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_slicing_default() {
        assert_eq!(
            RenderConfig::default().section_slicing,
            SectionSlicing::EndExclusive
        );
    }
}
