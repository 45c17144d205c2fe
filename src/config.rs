// src/config.rs

use std::env;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_STORAGE_KEY: &str = "wfm_requests";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub reference_data: Option<PathBuf>,
    pub storage_quota_bytes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            reference_data: None,
            storage_quota_bytes: None,
        }
    }
}

impl Config {
    /// Reads `WFM_*` variables; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let data_dir = lookup("WFM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage_key = lookup("WFM_STORAGE_KEY")
            .filter(|k| !k.trim().is_empty())
            .unwrap_or(defaults.storage_key);
        let reference_data = lookup("WFM_REFERENCE_DATA").map(PathBuf::from);
        let storage_quota_bytes = lookup("WFM_STORAGE_QUOTA_BYTES")
            .map(|s| {
                s.parse::<usize>()
                    .with_context(|| format!("WFM_STORAGE_QUOTA_BYTES must be a byte count, got {s:?}"))
            })
            .transpose()?;

        Ok(Self {
            data_dir,
            storage_key,
            reference_data,
            storage_quota_bytes,
        })
    }
}
