use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DevenvConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub setup: SetupConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SetupConfig {
    /// Organization whose repositories are listed alongside the
    /// authenticated user's own.
    #[serde(default = "default_organization")]
    pub organization: String,
    #[serde(default = "default_platform_versions")]
    pub platform_versions: Vec<String>,
    #[serde(default = "default_platform_version")]
    pub default_version: String,
    /// Default target directory offered in the form. Falls back to
    /// `~/odoo_projects` when unset.
    #[serde(default)]
    pub base_path: Option<PathBuf>,
    #[serde(default = "default_script")]
    pub script: String,
    /// Directory containing the provisioning script. Falls back to the
    /// directory of the running executable when unset.
    #[serde(default)]
    pub script_dir: Option<PathBuf>,
    #[serde(default = "default_repo_list_limit")]
    pub repo_list_limit: usize,
}

fn default_config_version() -> u32 {
    1
}

fn default_organization() -> String {
    "AbstractiveOdooPartner".to_string()
}

fn default_platform_versions() -> Vec<String> {
    ["master", "19.0", "18.0", "17.0", "16.0", "14.0"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_platform_version() -> String {
    "18.0".to_string()
}

fn default_script() -> String {
    "create.sh".to_string()
}

fn default_repo_list_limit() -> usize {
    100
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            platform_versions: default_platform_versions(),
            default_version: default_platform_version(),
            base_path: None,
            script: default_script(),
            script_dir: None,
            repo_list_limit: default_repo_list_limit(),
        }
    }
}

impl Default for DevenvConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            setup: SetupConfig::default(),
        }
    }
}

impl DevenvConfig {
    pub fn resolved_base_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(base_path) = &self.setup.base_path {
            return Ok(base_path.clone());
        }

        let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
        Ok(base_dirs.home_dir().join("odoo_projects"))
    }

    /// The provisioning script lives next to the installed binary unless
    /// the config points elsewhere.
    pub fn resolved_script_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(script_dir) = &self.setup.script_dir {
            return Ok(script_dir.clone());
        }

        let exe = std::env::current_exe()
            .map_err(|source| ConfigError::Read {
                path: PathBuf::from("<current executable>"),
                source,
            })?;
        let dir = exe.parent().ok_or_else(|| ConfigError::Validation {
            message: "running executable has no parent directory".to_string(),
        })?;
        Ok(dir.to_path_buf())
    }

    pub fn resolved_script_path(&self) -> anyhow::Result<PathBuf> {
        Ok(self.resolved_script_dir()?.join(&self.setup.script))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_home_dir() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs.home_dir().to_path_buf())
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("devenv")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<DevenvConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: DevenvConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

/// A missing config file is not an error: the tool runs with built-in
/// defaults. A present but invalid file is surfaced before the TUI starts.
pub fn load_config_or_default() -> anyhow::Result<DevenvConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        return Ok(DevenvConfig::default());
    }

    Ok(load_config(&path)?)
}

pub fn validate_config(config: &DevenvConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    if config.setup.platform_versions.is_empty() {
        return Err(ConfigError::Validation {
            message: "at least one platform version must be configured".to_string(),
        });
    }

    for (index, version) in config.setup.platform_versions.iter().enumerate() {
        if version.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: format!("platform_versions[{index}] must be non-empty"),
            });
        }
    }

    if !config
        .setup
        .platform_versions
        .contains(&config.setup.default_version)
    {
        return Err(ConfigError::Validation {
            message: format!(
                "default_version '{}' is not in platform_versions",
                config.setup.default_version
            ),
        });
    }

    if config.setup.script.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "script must be non-empty".to_string(),
        });
    }

    if config.setup.repo_list_limit == 0 {
        return Err(ConfigError::Validation {
            message: "repo_list_limit must be greater than zero".to_string(),
        });
    }

    Ok(())
}
