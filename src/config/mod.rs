// SPDX-License-Identifier: MPL-2.0
//! Picker configuration, persisted to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[paging]` - Items requested per page
//! - `[documents]` - Document scan policy (roots, holder names, depth)
//! - `[library]` - Directory backing the image and video library
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `MEDIA_PICKER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use media_picker::config::{self, PickerConfig};
//!
//! let (mut config, _warning) = config::load();
//! config.paging.page_size = Some(50);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::paging::PageSize;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Paging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagingConfig {
    /// Items requested per page. Clamped to the valid range on use.
    #[serde(default = "default_page_size", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Document scan settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentsConfig {
    /// Subdirectory names that get extra descent.
    #[serde(default = "default_holder_names")]
    pub holder_names: Vec<String>,

    /// Extra levels scanned below a holder directory.
    #[serde(default = "default_holder_descent_depth")]
    pub holder_descent_depth: usize,

    /// Whether the platform's download/document/desktop dirs are scanned.
    #[serde(default = "default_include_platform_roots")]
    pub include_platform_roots: bool,

    /// Additional roots scanned after the platform ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_roots: Vec<PathBuf>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            holder_names: default_holder_names(),
            holder_descent_depth: default_holder_descent_depth(),
            include_platform_roots: default_include_platform_roots(),
            extra_roots: Vec::new(),
        }
    }
}

impl DocumentsConfig {
    /// Descent depth clamped to the supported maximum.
    #[must_use]
    pub fn holder_depth(&self) -> usize {
        self.holder_descent_depth.min(MAX_HOLDER_DESCENT_DEPTH)
    }
}

/// Library settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    /// Directory whose subdirectories are presented as albums.
    /// Defaults to the platform pictures directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl LibraryConfig {
    /// Configured root, or the platform pictures directory.
    #[must_use]
    pub fn resolved_root(&self) -> Option<PathBuf> {
        self.root.clone().or_else(dirs::picture_dir)
    }
}

/// Complete picker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PickerConfig {
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub library: LibraryConfig,
}

impl PickerConfig {
    /// Page size with bounds applied.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.paging
            .page_size
            .map_or_else(PageSize::default, PageSize::new)
    }
}

// =============================================================================
// Default Value Functions (for serde)
// =============================================================================

#[allow(clippy::unnecessary_wraps)]
fn default_page_size() -> Option<usize> {
    Some(DEFAULT_PAGE_SIZE)
}

fn default_holder_names() -> Vec<String> {
    DEFAULT_DOCUMENT_HOLDER_NAMES
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}

fn default_holder_descent_depth() -> usize {
    DEFAULT_HOLDER_DESCENT_DEPTH
}

fn default_include_platform_roots() -> bool {
    true
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key.
pub fn load() -> (PickerConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (PickerConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "using default config");
                    return (
                        PickerConfig::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (PickerConfig::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<PickerConfig> {
    let content = fs::read_to_string(path)?;
    let config: PickerConfig = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &PickerConfig) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &PickerConfig, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_to_path(config: &PickerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = PickerConfig {
            paging: PagingConfig {
                page_size: Some(50),
            },
            documents: DocumentsConfig {
                holder_names: vec!["papers".to_string()],
                holder_descent_depth: 2,
                include_platform_roots: false,
                extra_roots: vec![PathBuf::from("/srv/shared")],
            },
            library: LibraryConfig {
                root: Some(PathBuf::from("/srv/photos")),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = PickerConfig::default();
        assert_eq!(config.paging.page_size, Some(DEFAULT_PAGE_SIZE));
        assert_eq!(config.page_size().get(), 30);
        assert_eq!(config.documents.holder_names.len(), 9);
        assert!(config.documents.include_platform_roots);
        assert_eq!(config.documents.holder_depth(), 1);
        assert!(config.library.root.is_none());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[documents]\nholder_descent_depth = 9\n").expect("write file");

        let loaded = load_from_path(&config_path).expect("partial config loads");
        assert_eq!(loaded.paging.page_size, Some(DEFAULT_PAGE_SIZE));
        assert_eq!(loaded.documents.holder_names, default_holder_names());
        assert_eq!(loaded.documents.holder_depth(), MAX_HOLDER_DESCENT_DEPTH);
    }

    #[test]
    fn page_size_is_clamped() {
        let mut config = PickerConfig::default();
        config.paging.page_size = Some(0);
        assert_eq!(config.page_size().get(), MIN_PAGE_SIZE);
        config.paging.page_size = Some(10_000);
        assert_eq!(config.page_size().get(), MAX_PAGE_SIZE);
        config.paging.page_size = None;
        assert_eq!(config.page_size().get(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = PickerConfig::default();
        config.paging.page_size = Some(12);
        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded.page_size().get(), 12);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
        assert_eq!(config, PickerConfig::default());
    }
}
