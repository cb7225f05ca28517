pub mod client;
pub mod models;
pub mod player_id;
pub mod serde_utils;
pub mod urls;

pub use client::{ClientOptions, SpiralClient};
pub use models::{
    ClubId, LocSegment, OpponentStats, OtherPlayerStatsEntry, PartnerStats, Player, PlayerId, PlayerStats, RankHistory,
    RankHistoryEntry, ValidationError,
};
pub use player_id::IntoPlayerId;
