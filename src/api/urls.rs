use urlencoding::encode;

use super::models::{ClubId, PlayerId};
use crate::errors::{ApiError, ApiResult};

pub fn players_path() -> String {
    "/players".to_string()
}

pub fn rank_history_path(player_id: PlayerId) -> String {
    format!("/rank_history/{}", encode(&player_id.to_string()))
}

pub fn player_stats_path(player_id: PlayerId) -> String {
    format!("/player_stats/{}", encode(&player_id.to_string()))
}

pub fn partner_stats_path(player_id: PlayerId, club_id: Option<ClubId>) -> String {
    let base = format!("/partner_stats/{}", encode(&player_id.to_string()));
    with_club_id(base, club_id)
}

pub fn opponent_stats_path(player_id: PlayerId, club_id: Option<ClubId>) -> String {
    let base = format!("/opponent_stats/{}", encode(&player_id.to_string()));
    with_club_id(base, club_id)
}

/// Validate a base address and drop any trailing slashes
pub fn normalize_base_url(base_url: &str) -> ApiResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ApiError::invalid_argument(
            "SpiralClient::new",
            "'base_url' is required.",
        ));
    }
    Ok(trimmed.to_string())
}

fn with_club_id(path: String, club_id: Option<ClubId>) -> String {
    match club_id {
        Some(club_id) => format!("{}?club_id={}", path, encode(&club_id.to_string())),
        None => path,
    }
}
