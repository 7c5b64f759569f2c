#![forbid(unsafe_code)]

//! View configuration and environment overrides.
//!
//! | Variable                | Field                      | Format          |
//! |-------------------------|----------------------------|-----------------|
//! | `LINVIZ_SWEEP_MS`       | [`AnimatorConfig::sweep`]        | milliseconds    |
//! | `LINVIZ_SETTLE_MS`      | [`AnimatorConfig::settle_delay`] | milliseconds    |
//! | `LINVIZ_COMMIT_MS`      | [`AnimatorConfig::commit_delay`] | milliseconds    |
//! | `LINVIZ_BUMP`           | [`AnimatorConfig::bump_height`]  | non-negative number |
//! | `LINVIZ_RESTART_POLICY` | [`AnimatorConfig::restart`]      | `keep` or `flush` |

use std::env;
use std::fmt;
use std::time::Duration;

use linviz_core::StructureKind;
use linviz_layout::PackerConfig;
use linviz_render::Palette;
use linviz_runtime::{AnimatorConfig, RestartPolicy};

use crate::Result;

pub const ENV_SWEEP_MS: &str = "LINVIZ_SWEEP_MS";
pub const ENV_SETTLE_MS: &str = "LINVIZ_SETTLE_MS";
pub const ENV_COMMIT_MS: &str = "LINVIZ_COMMIT_MS";
pub const ENV_BUMP: &str = "LINVIZ_BUMP";
pub const ENV_RESTART_POLICY: &str = "LINVIZ_RESTART_POLICY";

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Variable the value came from.
    pub key: &'static str,
    pub value: String,
    /// What would have been accepted.
    pub expected: &'static str,
}

impl ConfigError {
    fn new(key: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            key,
            value: value.into(),
            expected,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.key, self.value, self.expected)
    }
}

impl std::error::Error for ConfigError {}

/// Everything a [`Visualizer`](crate::Visualizer) needs besides its store.
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
    /// Packer settings. `None` uses the defaults of the view's structure kind.
    pub packer: Option<PackerConfig>,
    pub animator: AnimatorConfig,
    pub palette: Palette,
}

impl ViewConfig {
    /// Defaults with the timing overrides found in the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Defaults with timing overrides read through `get` (for tests).
    ///
    /// The first unusable value is reported; unset variables keep their
    /// defaults.
    pub fn from_env_with<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut animator = AnimatorConfig::default();
        if let Some(value) = get(ENV_SWEEP_MS) {
            animator.sweep = parse_millis(ENV_SWEEP_MS, &value)?;
        }
        if let Some(value) = get(ENV_SETTLE_MS) {
            animator.settle_delay = parse_millis(ENV_SETTLE_MS, &value)?;
        }
        if let Some(value) = get(ENV_COMMIT_MS) {
            animator.commit_delay = parse_millis(ENV_COMMIT_MS, &value)?;
        }
        if let Some(value) = get(ENV_BUMP) {
            animator.bump_height = value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|h| h.is_finite() && *h >= 0.0)
                .ok_or_else(|| ConfigError::new(ENV_BUMP, &value, "non-negative number"))?;
        }
        if let Some(value) = get(ENV_RESTART_POLICY) {
            animator.restart = parse_policy(&value)
                .ok_or_else(|| ConfigError::new(ENV_RESTART_POLICY, &value, "keep|flush"))?;
        }
        tracing::debug!(
            sweep_ms = animator.sweep.as_millis() as u64,
            settle_ms = animator.settle_delay.as_millis() as u64,
            commit_ms = animator.commit_delay.as_millis() as u64,
            bump = animator.bump_height,
            restart = ?animator.restart,
            "view config loaded"
        );
        Ok(Self {
            animator,
            ..Self::default()
        })
    }

    /// Use `packer` instead of the kind defaults (builder).
    #[must_use]
    pub fn packer(mut self, packer: PackerConfig) -> Self {
        self.packer = Some(packer);
        self
    }

    /// Set the animator timing (builder).
    #[must_use]
    pub fn animator(mut self, animator: AnimatorConfig) -> Self {
        self.animator = animator;
        self
    }

    /// Set the palette (builder).
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Packer settings for a structure of `kind`.
    ///
    /// An override configured for the other kind is ignored.
    pub fn packer_for(&self, kind: StructureKind) -> PackerConfig {
        match &self.packer {
            Some(cfg) if cfg.kind == kind => cfg.clone(),
            Some(cfg) => {
                tracing::warn!(
                    configured = %cfg.kind,
                    %kind,
                    "packer config is for another kind, using defaults"
                );
                PackerConfig::for_kind(kind)
            }
            None => PackerConfig::for_kind(kind),
        }
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::new(key, value, "milliseconds as an unsigned integer").into())
}

fn parse_policy(value: &str) -> Option<RestartPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "keep" => Some(RestartPolicy::KeepPending),
        "flush" => Some(RestartPolicy::FlushPending),
        _ => None,
    }
}
