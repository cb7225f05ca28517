use super::types::RankEstimate;

/// Team estimate for two players whose skills are independent Gaussians.
/// Means add; variances add, so sigmas combine in quadrature.
pub fn combine(a: RankEstimate, b: RankEstimate) -> RankEstimate {
    RankEstimate {
        mu: a.mu + b.mu,
        sigma: a.sigma.hypot(b.sigma),
    }
}
