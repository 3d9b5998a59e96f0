// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings loaded from `config.yaml` in the platform config directory, with
//! `FINVIEW_DATA` and `FINVIEW_PAGE_SIZE` overriding the file.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Finview", "finview"));

pub const DATA_ENV: &str = "FINVIEW_DATA";
pub const PAGE_SIZE_ENV: &str = "FINVIEW_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON data file; defaults to `records.json` in the platform data dir.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Rows per list page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Months shown in the cashflow tables.
    #[serde(default = "default_months")]
    pub months: usize,
    /// Label printed in front of amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_page_size() -> usize {
    10
}

fn default_months() -> usize {
    12
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            page_size: default_page_size(),
            months: default_months(),
            currency: default_currency(),
            log_level: default_log_level(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .ok_or_else(|| Error::Config("could not determine platform-specific directories".into()))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.yaml"))
}

pub fn default_data_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("records.json"))
}

impl Config {
    /// Reads `path`, or the default location when `path` is `None`. A missing
    /// file at the default location yields the defaults; a missing file that
    /// was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let p = default_config_path()?;
                if p.exists() {
                    Self::from_file(&p)?
                } else {
                    debug!("no config at {}, using defaults", p.display());
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies environment overrides read through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(data) = var(DATA_ENV).filter(|v| !v.is_empty()) {
            self.data_file = Some(PathBuf::from(data));
        }
        if let Some(raw) = var(PAGE_SIZE_ENV).filter(|v| !v.is_empty()) {
            self.page_size = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{PAGE_SIZE_ENV} must be a number, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".into()));
        }
        if self.months == 0 {
            return Err(Error::Config("months must be at least 1".into()));
        }
        Ok(())
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(p) => Ok(p.clone()),
            None => default_data_path(),
        }
    }
}
