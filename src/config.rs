// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tolerance configuration for healing and clipping

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`MeshConfig::load`]
pub const CONFIG_FILE: &str = "hullmesh.toml";

/// Tolerances used by the healing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealingConfig {
    /// Absolute per-coordinate distance under which two vertices are merged
    pub merge_atol: f64,
    /// A face is degenerate when its area is at most `degenerate_rtol` times the mean face area
    pub degenerate_rtol: f64,
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self {
            merge_atol: 1e-8,
            degenerate_rtol: 1e-5,
        }
    }
}

/// Tolerances used by the plane clipper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClippingConfig {
    /// Distance under which a vertex is considered to lie on the clipping plane
    pub vicinity_tol: f64,
}

impl Default for ClippingConfig {
    fn default() -> Self {
        Self { vicinity_tol: 1e-12 }
    }
}

/// Mesh configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub healing: HealingConfig,
    pub clipping: ClippingConfig,
}

impl MeshConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MeshConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Some(atol) = env_f64("HULLMESH_MERGE_ATOL")? {
            config.healing.merge_atol = atol;
        }

        if let Some(rtol) = env_f64("HULLMESH_DEGENERATE_RTOL")? {
            config.healing.degenerate_rtol = rtol;
        }

        if let Some(tol) = env_f64("HULLMESH_VICINITY_TOL")? {
            config.clipping.vicinity_tol = tol;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => {
            let parsed = value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid value for {key}: {value:?}"))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}
