use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("usage: tibia-actions <data-root> [rules-file]")]
    Usage,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid {name} '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub rules_path: PathBuf,
    pub scripts_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        if args.len() < 2 {
            return Err(ConfigError::Usage);
        }

        let root = Path::new(&args[1]).to_path_buf();
        let rules_path = if args.len() > 2 {
            PathBuf::from(&args[2])
        } else {
            root.join("actions").join("actions.yml")
        };
        let scripts_dir = rules_path
            .parent()
            .map(|dir| dir.join("scripts"))
            .unwrap_or_else(|| root.join("actions").join("scripts"));
        let log_level = std::env::var("TIBIA_LOG_LEVEL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "info".to_string());
        Ok(Self {
            root,
            rules_path,
            scripts_dir,
            log_level,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.yml")
    }
}

/// Delay settings of the action engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Cooldown after using an item by itself.
    pub actions_delay_ms: u64,
    /// Cooldown after using an item on something.
    pub ex_actions_delay_ms: u64,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            actions_delay_ms: 200,
            ex_actions_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    actions: ActionsConfig,
}

impl ActionsConfig {
    /// Reads the `actions` section of the config file, then applies
    /// environment overrides. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::parse(&content, path)?
        } else {
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.actions)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        for (name, slot) in [
            ("TIBIA_ACTIONS_DELAY_MS", &mut self.actions_delay_ms),
            ("TIBIA_EX_ACTIONS_DELAY_MS", &mut self.ex_actions_delay_ms),
        ] {
            let Some(value) = lookup(name) else {
                continue;
            };
            *slot = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv { name, value })?;
        }
        Ok(())
    }
}
