//! Session settings
//!
//! Read from a JSON file. Every field is optional; missing ones take the
//! built-in table and timing defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scheduler::{DEFAULT_MAX_SUBSTEPS, TimingMode};
use crate::sim::Table;

/// Seed used when neither the settings nor the caller provide one
pub const DEFAULT_SEED: u64 = 0x5eed_ba11;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Launch-jitter RNG seed
    pub seed: Option<u64>,
    /// How host frames map onto ticks
    pub timing: TimingMode,
    /// Tick cap per host frame in fixed timing
    pub max_substeps: u32,
    /// Table layout and tuning
    pub table: Table,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            timing: TimingMode::HostFrame,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            table: Table::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("parse settings json")?;
        settings.table.validate().context("invalid table")?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("read settings {:?}", path))?;
        let settings = Self::from_json(&json).with_context(|| format!("load settings {:?}", path))?;
        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load from `path` if given, otherwise (or on failure) use defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{:#}; using default settings", err);
                Self::default()
            }
        }
    }

    /// Settings as pretty JSON, a starting point for a custom table
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize settings")
    }

    /// Seed to run with: explicit override, then settings, then the default
    pub fn effective_seed(&self, override_seed: Option<u64>) -> u64 {
        override_seed.or(self.seed).unwrap_or(DEFAULT_SEED)
    }
}
