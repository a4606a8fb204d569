use anyhow::{Context, Result};
use microblog::{Network, Seed};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "microblog.toml";

/// Runtime context for microblog commands
pub struct AppContext {
    /// Path the config was loaded from, if any
    pub config_path: Option<PathBuf>,
    /// Loaded configuration (defaults when no file exists)
    pub config: MicroblogConfig,
}

/// Configuration stored in microblog.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MicroblogConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSettings {
    /// Seed file (.toml or .json). The built-in sample is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl AppContext {
    /// Load context from an explicit path, or from `microblog.toml` in the
    /// current directory when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = PathBuf::from(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self {
                        config_path: None,
                        config: MicroblogConfig::default(),
                    })
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: MicroblogConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self {
            config_path: Some(path.to_path_buf()),
            config,
        })
    }

    /// Dataset path: CLI override first, then config, with `${VAR}` expansion.
    /// Relative config paths resolve against the config file's directory.
    pub fn dataset_path(&self, cli_override: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = cli_override {
            return Ok(Some(path.to_path_buf()));
        }
        let Some(raw) = self.config.dataset.path.as_deref() else {
            return Ok(None);
        };

        let expanded = PathBuf::from(expand_env(raw)?);
        let base = self.config_path.as_deref().and_then(Path::parent);
        Ok(Some(match base {
            Some(dir) if expanded.is_relative() => dir.join(expanded),
            _ => expanded,
        }))
    }

    /// Build the network from the configured dataset or the built-in sample.
    pub fn load_network(&self, cli_override: Option<&Path>) -> Result<Network> {
        let seed = match self.dataset_path(cli_override)? {
            Some(path) => load_seed(&path)?,
            None => Seed::sample(),
        };
        seed.into_network().context("Dataset does not describe a valid network")
    }
}

/// Parse a seed file, choosing the format by extension.
pub fn load_seed(path: &Path) -> Result<Seed> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let seed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Seed::from_json_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Some("toml") => Seed::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported dataset extension {:?} for {} (expected .toml or .json)",
            other.unwrap_or(""),
            path.display()
        ),
    };
    log::debug!("loaded {} seed posts from {}", seed.posts.len(), path.display());
    Ok(seed)
}

/// Expand a value of the form `${VAR}` from the environment; other values
/// pass through unchanged.
fn expand_env(value: &str) -> Result<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).with_context(|| format!("Environment variable {var_name} not set"))
    } else {
        Ok(value.to_string())
    }
}
