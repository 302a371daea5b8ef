use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:4221";
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Process-wide server configuration. Built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to
    pub address: String,
    /// Root for `/files/`; `None` makes every file route answer 404
    pub directory: Option<PathBuf>,
    /// Deadline for reading a whole request, in seconds
    pub read_timeout_secs: u64,
    /// Answer recognised paths with an unsupported method with 405 instead of 404
    pub strict_method_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            directory: None,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            strict_method_status: false,
        }
    }
}

impl Config {
    /// Defaults overlaid with variables from `lookup`:
    /// `LISTEN` for the address and `FILES_DIRECTORY` for the file root.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        cfg.apply_lookup(lookup);
        cfg
    }

    pub fn apply_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(address) = lookup("LISTEN") {
            self.address = address;
        }
        if let Some(directory) = lookup("FILES_DIRECTORY") {
            self.set_directory(directory);
        }
    }

    /// Parses a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = serde_yaml::from_str(source).context("invalid config file")?;
        anyhow::ensure!(
            cfg.read_timeout_secs > 0,
            "read_timeout_secs must be greater than 0"
        );
        // An empty string is the same as no directory at all
        if cfg.directory.as_ref().is_some_and(|d| d.as_os_str().is_empty()) {
            cfg.directory = None;
        }
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&source)
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        let directory = directory.into();
        self.directory = if directory.as_os_str().is_empty() {
            None
        } else {
            Some(directory)
        };
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
