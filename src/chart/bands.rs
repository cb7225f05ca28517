use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::models::RankHistoryEntry;

/// ~99.7% of a normal distribution lies within three standard deviations
pub const BAND_Z: f64 = 3.0;

/// One history point as drawn: mean plus lower/upper confidence bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub datetime: NaiveDateTime,
    pub mu: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Band {
    pub fn timestamp_ms(&self) -> i64 {
        self.datetime.and_utc().timestamp_millis()
    }
}

pub fn derive_bands(history: &[RankHistoryEntry]) -> Vec<Band> {
    derive_bands_with(history, BAND_Z)
}

/// Same as [`derive_bands`] with a custom width in standard deviations
pub fn derive_bands_with(history: &[RankHistoryEntry], z: f64) -> Vec<Band> {
    history.iter().map(|entry| to_band(entry, z)).collect()
}

fn to_band(entry: &RankHistoryEntry, z: f64) -> Band {
    Band {
        datetime: entry.datetime,
        mu: entry.mu,
        lower_bound: lower_bound(entry.mu, entry.sigma, z),
        upper_bound: upper_bound(entry.mu, entry.sigma, z),
    }
}

// Skill cannot be negative.
fn lower_bound(mu: f64, sigma: f64, z: f64) -> f64 {
    (mu - z * sigma).max(0.0)
}

fn upper_bound(mu: f64, sigma: f64, z: f64) -> f64 {
    mu + z * sigma
}
