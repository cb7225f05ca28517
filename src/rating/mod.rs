pub mod combination;
pub mod types;

pub use combination::combine;
pub use types::RankEstimate;
