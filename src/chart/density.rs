use std::f64::consts::PI;

use crate::errors::ComputationError;
use crate::rating::RankEstimate;

pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Padding around the plotted estimates, in standard deviations
pub const DOMAIN_SIGMAS: f64 = 4.0;

/// Caller-pinned ends of the x axis; unset ends are derived from the ranks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomainHint {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DomainHint {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn from_min(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    fn is_complete(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

/// Density curves sampled on one shared grid
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySamples {
    pub domain: Domain,
    pub xs: Vec<f64>,
    /// One curve per input rank, each aligned with `xs`
    pub series: Vec<Vec<f64>>,
}

impl DensitySamples {
    /// Grid point and density where curve `index` is highest
    pub fn peak(&self, index: usize) -> Option<(f64, f64)> {
        let curve = self.series.get(index)?;
        self.xs
            .iter()
            .copied()
            .zip(curve.iter().copied())
            .fold(None, |best: Option<(f64, f64)>, (x, y)| match best {
                Some((_, best_y)) if best_y >= y => best,
                _ => Some((x, y)),
            })
    }
}

pub fn norm_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let fraction = 1.0 / (sigma * (2.0 * PI).sqrt());
    let exponent = -((x - mu).powi(2) / (2.0 * sigma.powi(2)));
    fraction * exponent.exp()
}

/// Sample the normal density of every rank over a shared grid of
/// `sample_count` points spanning `[min, max)`.
///
/// Undefined for a rank with `sigma == 0`, and for an empty `ranks` unless
/// `hint` pins both domain ends; see [`ensure_sampleable`].
pub fn sample_densities(ranks: &[RankEstimate], hint: Option<DomainHint>, sample_count: usize) -> DensitySamples {
    sample_densities_with(ranks, hint, sample_count, DOMAIN_SIGMAS)
}

pub fn sample_densities_with(
    ranks: &[RankEstimate],
    hint: Option<DomainHint>,
    sample_count: usize,
    domain_sigmas: f64,
) -> DensitySamples {
    let domain = resolve_domain(ranks, hint.unwrap_or_default(), domain_sigmas);
    let xs = grid(domain, sample_count);
    let series = ranks
        .iter()
        .map(|rank| xs.iter().map(|&x| norm_pdf(x, rank.mu, rank.sigma)).collect())
        .collect();

    DensitySamples { domain, xs, series }
}

/// Check the inputs of [`sample_densities`] describe a defined computation
pub fn ensure_sampleable(ranks: &[RankEstimate], hint: Option<DomainHint>) -> Result<(), ComputationError> {
    ensure_sampleable_with(ranks, hint, DOMAIN_SIGMAS)
}

pub fn ensure_sampleable_with(
    ranks: &[RankEstimate],
    hint: Option<DomainHint>,
    domain_sigmas: f64,
) -> Result<(), ComputationError> {
    let hint = hint.unwrap_or_default();
    if ranks.is_empty() && !hint.is_complete() {
        return Err(ComputationError::ComputationUndefined(
            "no ranks to derive a density domain from".to_string(),
        ));
    }
    if let Some(rank) = ranks.iter().find(|rank| rank.is_degenerate()) {
        return Err(ComputationError::ComputationUndefined(format!(
            "density needs a finite mu and positive sigma, got mu={} sigma={}",
            rank.mu, rank.sigma
        )));
    }

    let domain = resolve_domain(ranks, hint, domain_sigmas);
    if !(domain.min < domain.max) || !domain.min.is_finite() || !domain.max.is_finite() {
        return Err(ComputationError::ComputationUndefined(format!(
            "empty density domain [{}, {}]",
            domain.min, domain.max
        )));
    }
    Ok(())
}

pub fn resolve_domain(ranks: &[RankEstimate], hint: DomainHint, domain_sigmas: f64) -> Domain {
    let lowest_mu = ranks.iter().map(|r| r.mu).fold(f64::INFINITY, f64::min);
    let biggest_mu = ranks.iter().map(|r| r.mu).fold(f64::NEG_INFINITY, f64::max);
    let biggest_sigma = ranks.iter().map(|r| r.sigma).fold(0.0, f64::max);

    Domain {
        min: hint.min.unwrap_or(lowest_mu - domain_sigmas * biggest_sigma),
        max: hint.max.unwrap_or(biggest_mu + domain_sigmas * biggest_sigma),
    }
}

fn grid(domain: Domain, sample_count: usize) -> Vec<f64> {
    let interval = (domain.max - domain.min) / sample_count as f64;
    (0..sample_count)
        .map(|i| domain.min + i as f64 * interval)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let ranks = [RankEstimate::default()];
        let samples = sample_densities(&ranks, None, 250);

        assert_eq!(samples.xs.len(), 250);
        assert_eq!(samples.series.len(), 1);
        assert_eq!(samples.series[0].len(), 250);
        assert!(samples.xs.windows(2).all(|w| w[0] < w[1]));
        assert!(*samples.xs.last().unwrap() < samples.domain.max);
        assert_eq!(samples.xs[0], samples.domain.min);
    }

    #[test]
    fn test_derived_domain() {
        let ranks = [RankEstimate::new(20.0, 2.0), RankEstimate::new(30.0, 5.0)];
        let domain = resolve_domain(&ranks, DomainHint::default(), DOMAIN_SIGMAS);

        assert_eq!(domain, Domain { min: 0.0, max: 50.0 });
    }

    #[test]
    fn test_hint_overrides_one_end() {
        let ranks = [RankEstimate::new(20.0, 2.0)];
        let samples = sample_densities(&ranks, Some(DomainHint::from_min(0.0)), 100);

        assert_eq!(samples.domain, Domain { min: 0.0, max: 28.0 });
    }

    #[test]
    fn test_single_rank_peaks_at_mu() {
        let rank = RankEstimate::new(25.0, 25.0 / 3.0);
        let samples = sample_densities(&[rank], None, DEFAULT_SAMPLE_COUNT);
        let curve = &samples.series[0];

        let nearest = samples
            .xs
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - rank.mu).abs().total_cmp(&(b.1 - rank.mu).abs()))
            .map(|(i, _)| i)
            .unwrap();

        let (peak_x, _) = samples.peak(0).unwrap();
        assert_eq!(peak_x, samples.xs[nearest]);
        assert!(curve[..=nearest].windows(2).all(|w| w[0] < w[1]));
        assert!(curve[nearest..].windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_density_values() {
        let peak = norm_pdf(0.0, 0.0, 1.0);
        assert!((peak - 1.0 / (2.0 * PI).sqrt()).abs() < 1e-12);
        assert!((norm_pdf(1.0, 0.0, 1.0) - norm_pdf(-1.0, 0.0, 1.0)).abs() < 1e-15);
    }

    #[test]
    fn test_one_curve_per_rank() {
        let ranks = [
            RankEstimate::new(40.0, 6.0),
            RankEstimate::new(55.0, 4.0),
            RankEstimate::new(50.0, 9.0),
        ];
        let samples = sample_densities(&ranks, Some(DomainHint::new(0.0, 100.0)), 400);

        assert_eq!(samples.series.len(), 3);
        assert!(samples.series.iter().all(|curve| curve.len() == 400));
        assert_eq!(samples.xs[1] - samples.xs[0], 0.25);
    }

    #[test]
    fn test_ensure_sampleable() {
        assert!(ensure_sampleable(&[RankEstimate::default()], None).is_ok());
        assert!(ensure_sampleable(&[], Some(DomainHint::new(0.0, 10.0))).is_ok());

        assert!(matches!(
            ensure_sampleable(&[], Some(DomainHint::from_min(0.0))),
            Err(ComputationError::ComputationUndefined(_))
        ));
        assert!(matches!(
            ensure_sampleable(&[RankEstimate::new(25.0, 0.0)], None),
            Err(ComputationError::ComputationUndefined(_))
        ));
    }

    #[test]
    fn test_inverted_domain_is_undefined() {
        // Pinned at zero while every estimate sits far below it.
        let ranks = [RankEstimate::new(-100.0, 1.0)];
        assert!(matches!(
            ensure_sampleable(&ranks, Some(DomainHint::from_min(0.0))),
            Err(ComputationError::ComputationUndefined(_))
        ));
        assert!(matches!(
            ensure_sampleable(&[], Some(DomainHint::new(5.0, 5.0))),
            Err(ComputationError::ComputationUndefined(_))
        ));
        assert!(matches!(
            ensure_sampleable_with(&[RankEstimate::new(-2.0, 1.0)], Some(DomainHint::from_min(0.0)), 1.0),
            Err(ComputationError::ComputationUndefined(_))
        ));
        assert!(ensure_sampleable_with(&[RankEstimate::new(-2.0, 1.0)], Some(DomainHint::from_min(0.0)), 4.0).is_ok());
    }
}
