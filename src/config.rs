//! Scan configuration
//!
//! `ScanConfig` carries the per-run options and loads from JSON (serde) or from
//! `DMTX_*` environment variables. Detector tunables that are not part of the
//! public options are read once per process from the environment.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Environment variable for [`ScanConfig::shrink_min`]
pub const ENV_SHRINK_MIN: &str = "DMTX_SHRINK_MIN";
/// Environment variable for [`ScanConfig::corrections_max`]
pub const ENV_CORRECTIONS_MAX: &str = "DMTX_CORRECTIONS_MAX";
/// Environment variable for [`ScanConfig::stop_after`]
pub const ENV_STOP_AFTER: &str = "DMTX_STOP_AFTER";

/// Options for one scan run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    /// Integer sub-sampling factor of the search plane; values below 1 act as 1
    pub shrink_min: usize,
    /// Maximum Reed-Solomon symbol corrections accepted per region, `None` for unlimited
    pub corrections_max: Option<usize>,
    /// Cap on successful decodes per frame, `None` for unlimited
    pub stop_after: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            shrink_min: 1,
            corrections_max: None,
            stop_after: None,
        }
    }
}

impl ScanConfig {
    /// Set the search plane shrink factor (clamped to at least 1)
    pub fn with_shrink_min(mut self, shrink_min: usize) -> Self {
        self.shrink_min = shrink_min.max(1);
        self
    }

    /// Limit the Reed-Solomon corrections accepted per region
    pub fn with_corrections_max(mut self, corrections_max: Option<usize>) -> Self {
        self.corrections_max = corrections_max;
        self
    }

    /// Stop scanning a frame after this many decoded symbols
    pub fn with_stop_after(mut self, stop_after: Option<usize>) -> Self {
        self.stop_after = stop_after;
        self
    }

    /// Shrink factor actually applied to the search plane
    pub fn effective_shrink(&self) -> usize {
        self.shrink_min.max(1)
    }

    /// Load from the `DMTX_*` environment variables, ignoring unparsable values
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup; missing or unparsable values keep the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |name: &str| {
            lookup(name).and_then(|v| v.trim().parse::<usize>().ok())
        };

        let mut config = Self::default();
        if let Some(shrink) = parse(ENV_SHRINK_MIN) {
            config = config.with_shrink_min(shrink);
        }
        if let Some(max) = parse(ENV_CORRECTIONS_MAX) {
            config.corrections_max = Some(max);
        }
        if let Some(stop) = parse(ENV_STOP_AFTER) {
            config.stop_after = Some(stop);
        }
        config
    }
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

static MAX_HYPOTHESES: OnceLock<usize> = OnceLock::new();

/// Symbol hypotheses tried per region before giving up on it
pub(crate) fn max_hypotheses() -> usize {
    *MAX_HYPOTHESES.get_or_init(|| parse_env_usize("DMTX_MAX_HYPOTHESES", 4).clamp(1, 16))
}

static MIN_PATTERN_SCORE: OnceLock<f32> = OnceLock::new();

/// Minimum fraction of finder and timing modules that must match a hypothesis
pub(crate) fn min_pattern_score() -> f32 {
    *MIN_PATTERN_SCORE.get_or_init(|| parse_env_f32("DMTX_MIN_PATTERN_SCORE", 0.85).clamp(0.5, 1.0))
}

static MIN_CANDIDATE_SIDE: OnceLock<usize> = OnceLock::new();

/// Smallest bounding-box side, in search plane pixels, of a candidate component
pub(crate) fn min_candidate_side() -> usize {
    *MIN_CANDIDATE_SIDE.get_or_init(|| parse_env_usize("DMTX_MIN_CANDIDATE_SIDE", 8).clamp(4, 64))
}
