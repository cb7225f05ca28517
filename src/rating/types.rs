use serde::{Deserialize, Serialize};

use crate::config::RatingSettings;

/// Gaussian belief over a player's (or team's) skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankEstimate {
    pub mu: f64,
    pub sigma: f64,
}

impl Default for RankEstimate {
    fn default() -> Self {
        Self {
            mu: 25.0,
            sigma: 25.0 / 3.0,
        }
    }
}

impl RankEstimate {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Prior used for players without any rated match
    pub fn prior(settings: &RatingSettings) -> Self {
        Self::new(settings.default_mu, settings.default_sigma)
    }

    /// Zero (or invalid) spread: no density can be drawn for it
    pub fn is_degenerate(&self) -> bool {
        !(self.sigma > 0.0) || !self.sigma.is_finite() || !self.mu.is_finite()
    }
}
