pub mod bands;
pub mod density;
pub mod window;

pub use bands::{Band, derive_bands, derive_bands_with};
pub use density::{
    DensitySamples, Domain, DomainHint, ensure_sampleable, ensure_sampleable_with, sample_densities,
    sample_densities_with,
};
pub use window::{Edge, EpochMillis, SeriesSpan, TimeWindow, WindowSelector};
