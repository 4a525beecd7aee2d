// ─────────────────────────────────────────────────────────────────────
// NumPro Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DAMPING, PSEUDO_ZERO};
use crate::error::{NumError, NumResult};

/// Top-level configuration.
/// Both sections may be omitted from the JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NumProConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Tolerances shared by every elimination routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Pivots with magnitude below this are treated as zero (default: 1e-10).
    #[serde(default = "default_pseudo_zero")]
    pub pseudo_zero: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Probability of teleporting to a random node instead of following a
    /// link (default: 0.15).
    #[serde(default = "default_damping")]
    pub damping: f64,
}

fn default_pseudo_zero() -> f64 {
    PSEUDO_ZERO
}
fn default_damping() -> f64 {
    DEFAULT_DAMPING
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            pseudo_zero: default_pseudo_zero(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            damping: default_damping(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> NumResult<()> {
        if !self.pseudo_zero.is_finite() || self.pseudo_zero < 0.0 {
            return Err(NumError::ConfigError(format!(
                "pseudo_zero must be finite and >= 0, got {}",
                self.pseudo_zero
            )));
        }
        Ok(())
    }
}

impl RankingConfig {
    pub fn validate(&self) -> NumResult<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(NumError::ConfigError(format!(
                "damping must lie in [0, 1], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

impl NumProConfig {
    /// Load from a JSON file and validate every section.
    pub fn from_file(path: &str) -> NumResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> NumResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.solver.validate()?;
        config.ranking.validate()?;
        Ok(config)
    }
}
