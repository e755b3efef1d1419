use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

/// Category workflows the user can toggle on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCategory {
    Windows,
    Office,
    Dotnet,
    Vcredist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCategories {
    #[serde(default = "default_true")]
    pub windows: bool,

    #[serde(default = "default_true")]
    pub office: bool,

    #[serde(default = "default_true")]
    pub dotnet: bool,

    #[serde(default)]
    pub vcredist: bool,
}

impl Default for UpdateCategories {
    fn default() -> Self {
        Self {
            windows: true,
            office: true,
            dotnet: true,
            vcredist: false,
        }
    }
}

impl UpdateCategories {
    pub fn set(&mut self, category: UpdateCategory, enabled: bool) {
        match category {
            UpdateCategory::Windows => self.windows = enabled,
            UpdateCategory::Office => self.office = enabled,
            UpdateCategory::Dotnet => self.dotnet = enabled,
            UpdateCategory::Vcredist => self.vcredist = enabled,
        }
    }

    #[must_use]
    pub fn get(&self, category: UpdateCategory) -> bool {
        match category {
            UpdateCategory::Windows => self.windows,
            UpdateCategory::Office => self.office,
            UpdateCategory::Dotnet => self.dotnet,
            UpdateCategory::Vcredist => self.vcredist,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "winup_platform::default_repo_root")]
    pub repo_path: PathBuf,

    #[serde(default)]
    pub update_categories: UpdateCategories,

    #[serde(default)]
    pub auto_reboot: bool,

    #[serde(default)]
    pub dark_mode: bool,

    #[serde(default = "default_shell_timeout")]
    pub shell_timeout_secs: u64,

    #[serde(default = "default_servicing_timeout")]
    pub servicing_timeout_secs: u64,

    #[serde(default = "default_office_timeout")]
    pub office_timeout_secs: u64,
}

fn default_shell_timeout() -> u64 {
    3600
}

fn default_servicing_timeout() -> u64 {
    600
}

fn default_office_timeout() -> u64 {
    1200
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_path: winup_platform::default_repo_root(),
            update_categories: UpdateCategories::default(),
            auto_reboot: false,
            dark_mode: false,
            shell_timeout_secs: default_shell_timeout(),
            servicing_timeout_secs: default_servicing_timeout(),
            office_timeout_secs: default_office_timeout(),
        }
    }
}

/// Where settings come from and go to. Injected into the engine so workflows
/// and tests never depend on ambient global state.
pub trait SettingsStore: Send + Sync {
    /// Load settings, falling back to the full defaults on any failure.
    fn load(&self) -> Settings;

    /// Persist the given settings.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    fn save(&self, settings: &Settings) -> io::Result<()>;
}

/// JSON settings file at a fixed path under the default repository root.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(winup_platform::default_repo_root().join("config.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Settings {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!("Settings file is unreadable, using defaults: {err}");
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }

    fn save(&self, settings: &Settings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)
    }
}
