//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use serde::Serialize;

use crate::consts::{DEFAULT_BACKGROUND_SRC, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, MARKER_RADIUS, MIN_SHAPE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be positive, got {value}")]
    NonPositive { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorConfig {
    /// Surface width in CSS pixels.
    pub surface_width: f64,
    /// Surface height in CSS pixels.
    pub surface_height: f64,
    /// Minimum width/height after a handle resize.
    pub min_size: f64,
    pub marker_radius: f64,
    /// Source URL of the background image.
    pub background_src: String,
    /// Fixed seed for marker colors; random when absent.
    pub color_seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            min_size: MIN_SHAPE_SIZE,
            marker_radius: MARKER_RADIUS,
            background_src: DEFAULT_BACKGROUND_SRC.to_owned(),
            color_seed: None,
        }
    }
}

impl EditorConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `EDITOR_SURFACE_WIDTH`: default 800
    /// - `EDITOR_SURFACE_HEIGHT`: default 600
    /// - `EDITOR_MIN_SIZE`: default 5
    /// - `EDITOR_MARKER_RADIUS`: default 50
    /// - `EDITOR_BACKGROUND_SRC`: default sample photo URL
    /// - `EDITOR_COLOR_SEED`: unset means a fresh random seed
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable does not parse or is not positive.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env_value(key, std::env::var(key)))
    }

    /// Build config from any key lookup, falling back to defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Same as [`EditorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            surface_width: positive(&lookup, "EDITOR_SURFACE_WIDTH", defaults.surface_width)?,
            surface_height: positive(&lookup, "EDITOR_SURFACE_HEIGHT", defaults.surface_height)?,
            min_size: positive(&lookup, "EDITOR_MIN_SIZE", defaults.min_size)?,
            marker_radius: positive(&lookup, "EDITOR_MARKER_RADIUS", defaults.marker_radius)?,
            background_src: lookup("EDITOR_BACKGROUND_SRC")
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.background_src),
            color_seed: seed(&lookup, "EDITOR_COLOR_SEED")?,
        })
    }
}

/// Unset variables fall back to defaults. Non-UTF-8 values are passed on
/// lossily so numeric parsing reports them instead of silently defaulting.
fn env_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            tracing::warn!(key, "environment value is not valid UTF-8");
            Some(raw.to_string_lossy().into_owned())
        }
    }
}

fn positive<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw.clone() })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive { var, value: raw });
    }
    Ok(value)
}

fn seed<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw.clone() })
}
