use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use gravityfit_catalog::DEFAULT_CANDIDATES;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "GRAVITYFIT_CONFIG";
pub const BIND_ENV: &str = "GRAVITYFIT_BIND";
pub const DATASET_ENV: &str = "GRAVITYFIT_DATASET";
pub const ORIGIN_ENV: &str = "FRONTEND_ORIGIN";
pub const SEED_ENV: &str = "GRAVITYFIT_SAMPLE_SEED";

/// Service settings: defaults, then an optional YAML file named by
/// `GRAVITYFIT_CONFIG`, then individual environment overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub dataset_path: Option<PathBuf>,
    /// Single origin allowed by CORS; `None` disables the CORS layer.
    pub frontend_origin: Option<String>,
    /// Seeds the random sampler behind blank searches.
    pub sample_seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".into(),
            dataset_path: None,
            frontend_origin: Some("http://localhost:3000".into()),
            sample_seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: ServiceConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load() -> anyhow::Result<Self> {
        let base = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_path(path)?,
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (the process environment in production).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_addr = bind;
        }
        if let Some(path) = lookup(DATASET_ENV).filter(|p| !p.is_empty()) {
            self.dataset_path = Some(PathBuf::from(path));
        }
        if let Some(origin) = lookup(ORIGIN_ENV) {
            self.frontend_origin = Some(origin).filter(|o| !o.is_empty());
        }
        if let Some(seed) = lookup(SEED_ENV) {
            let seed = seed
                .parse::<u64>()
                .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got '{seed}'"))?;
            self.sample_seed = Some(seed);
        }
        self.socket_addr()?;
        Ok(self)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))
    }

    /// The configured dataset, or the well-known fallbacks when unset.
    pub fn dataset_candidates(&self) -> Vec<PathBuf> {
        match &self.dataset_path {
            Some(path) => vec![path.clone()],
            None => DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}
