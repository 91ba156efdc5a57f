// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

use crate::bus::{CLIPBOARD_BUS_NAME, CLIPBOARD_OBJECT_PATH};
use npclip_core::type_registry::DEFAULT_PREVIEW_CHARS;

const CONFIG_PREFIX: &str = "npclip";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_LOG_LEVEL: &str = "info";

/// The main configuration structure for the clipboard service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Bus registration
    #[serde(default)]
    pub bus: BusSettings,
    /// Object store
    #[serde(default)]
    pub store: StoreSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusSettings {
    /// Well-known name claimed on the session bus.
    pub name: Option<String>,
    pub object_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    pub preview_chars: Option<usize>,
}

/// Registry for managing service settings.
pub struct SettingsRegistry {
    config: Config,
}

impl SettingsRegistry {
    /// Create a new SettingsRegistry and load configuration from standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// A registry holding only built-in defaults, without touching the filesystem.
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/npclip/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/npclip/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/npclip/config.toml (XDG_CONFIG_HOME)
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(CONFIG_PREFIX)?;

        for path in xdg_dirs.find_data_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        for path in xdg_dirs.find_config_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        if let Some(user_config_path) = xdg_dirs.find_config_file(CONFIG_FILE) {
            self.load_file(&user_config_path).await;
        } else {
            let user_config_path = xdg_dirs.get_config_home().join(CONFIG_FILE);
            if user_config_path.exists() {
                self.load_file(&user_config_path).await;
            }
        }

        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(loaded_config) => {
                    self.merge(loaded_config);
                },
                Err(e) => {
                    log::error!("Failed to parse config file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
            },
        }
    }

    /// Load configuration from explicit paths, merged after everything else.
    ///
    /// Unlike the standard locations, a missing or malformed file is reported.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path, e))?;

                let loaded_config: Config = toml::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path, e))?;

                self.merge(loaded_config);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Merge a loaded config into the current config.
    fn merge(&mut self, other: Config) {
        if other.general.log_level.is_some() {
            self.config.general.log_level = other.general.log_level;
        }

        if other.bus.name.is_some() {
            self.config.bus.name = other.bus.name;
        }
        if other.bus.object_path.is_some() {
            self.config.bus.object_path = other.bus.object_path;
        }

        if other.store.preview_chars.is_some() {
            self.config.store.preview_chars = other.store.preview_chars;
        }

        self.config.other.extend(other.other);
    }

    /// Get the current configuration.
    pub fn get(&self) -> &Config {
        &self.config
    }

    pub fn log_level(&self) -> &str {
        self.config
            .general
            .log_level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn bus_name(&self) -> &str {
        self.config.bus.name.as_deref().unwrap_or(CLIPBOARD_BUS_NAME)
    }

    pub fn object_path(&self) -> &str {
        self.config
            .bus
            .object_path
            .as_deref()
            .unwrap_or(CLIPBOARD_OBJECT_PATH)
    }

    pub fn preview_chars(&self) -> usize {
        self.config
            .store
            .preview_chars
            .unwrap_or(DEFAULT_PREVIEW_CHARS)
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
