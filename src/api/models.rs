use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::serde_utils;
use crate::rating::RankEstimate;

pub type PlayerId = i64;
pub type ClubId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// Rating after one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankHistoryEntry {
    #[serde(default)]
    pub club_id: Option<ClubId>,
    pub match_id: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "serde_utils::datetime")]
    pub datetime: NaiveDateTime,
    pub winner: bool,
    pub mu: f64,
    pub sigma: f64,
}

impl RankHistoryEntry {
    pub fn estimate(&self) -> RankEstimate {
        RankEstimate::new(self.mu, self.sigma)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankHistory {
    pub player_id: PlayerId,
    pub history: Vec<RankHistoryEntry>,
}

impl RankHistory {
    /// Rating after the most recent match, if any were played
    pub fn latest_estimate(&self) -> Option<RankEstimate> {
        self.history.last().map(RankHistoryEntry::estimate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(alias = "player_id")]
    pub player_id: PlayerId,
    pub average_points_difference: f64,
    pub total_matches: i64,
    pub wins: i64,
}

impl PlayerStats {
    /// Share of matches won, `None` before the first match
    pub fn win_rate(&self) -> Option<f64> {
        if self.total_matches <= 0 {
            return None;
        }
        Some(self.wins as f64 / self.total_matches as f64)
    }
}

/// Record with one partner or opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherPlayerStatsEntry {
    #[serde(alias = "playerId")]
    pub partner_id: PlayerId,
    #[serde(alias = "playerName")]
    pub partner_name: String,
    pub wins: i64,
    pub matches: i64,
    #[serde(default)]
    pub win_rate: Option<f64>,
}

impl OtherPlayerStatsEntry {
    pub fn computed_win_rate(&self) -> f64 {
        if self.matches <= 0 {
            return 0.0;
        }
        self.wins as f64 / self.matches as f64
    }

    /// Reported rate, or the computed one when the API sent none
    pub fn effective_win_rate(&self) -> f64 {
        self.win_rate.unwrap_or_else(|| self.computed_win_rate())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerStats {
    pub player_id: PlayerId,
    #[serde(default)]
    pub club_id: Option<ClubId>,
    pub partners: Vec<OtherPlayerStatsEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentStats {
    pub player_id: PlayerId,
    #[serde(default)]
    pub club_id: Option<ClubId>,
    pub opponents: Vec<OtherPlayerStatsEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Index(i64),
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HttpValidationError {
    #[serde(default)]
    pub detail: Option<Vec<ValidationError>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rank_history_from_api() {
        let history: RankHistory = serde_json::from_value(json!({
            "player_id": 7,
            "history": [
                {
                    "match_id": 0,
                    "date": "2025-01-01",
                    "start_time": "00:00:00",
                    "datetime": "2025-01-01T00:00:00",
                    "winner": false,
                    "mu": 25.0,
                    "sigma": 8.333
                },
                {
                    "club_id": 1,
                    "match_id": 12,
                    "datetime": "2025-02-03T19:30:00.250Z",
                    "winner": true,
                    "mu": 27.5,
                    "sigma": 7.9
                }
            ]
        }))
        .unwrap();

        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[1].club_id, Some(1));
        assert_eq!(history.history[0].datetime.and_utc().timestamp_millis(), 1_735_689_600_000);
        assert_eq!(history.latest_estimate(), Some(RankEstimate::new(27.5, 7.9)));
    }

    #[test]
    fn test_empty_history_has_no_latest_estimate() {
        let history = RankHistory {
            player_id: 1,
            history: vec![],
        };
        assert_eq!(history.latest_estimate(), None);
    }

    #[test]
    fn test_player_stats_accepts_both_id_spellings() {
        let camel: PlayerStats = serde_json::from_value(json!({
            "playerId": 3, "averagePointsDifference": 1.5, "totalMatches": 4, "wins": 3
        }))
        .unwrap();
        let snake: PlayerStats = serde_json::from_value(json!({
            "player_id": 3, "averagePointsDifference": 1.5, "totalMatches": 4, "wins": 3
        }))
        .unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.win_rate(), Some(0.75));
    }

    #[test]
    fn test_win_rate_without_matches() {
        let stats = PlayerStats {
            player_id: 1,
            average_points_difference: 0.0,
            total_matches: 0,
            wins: 0,
        };
        assert_eq!(stats.win_rate(), None);

        let entry = OtherPlayerStatsEntry {
            partner_id: 2,
            partner_name: "Bo".to_string(),
            wins: 0,
            matches: 0,
            win_rate: None,
        };
        assert_eq!(entry.effective_win_rate(), 0.0);
    }

    #[test]
    fn test_partner_stats_from_api() {
        let stats: PartnerStats = serde_json::from_value(json!({
            "playerId": 3,
            "clubId": 1,
            "partners": [
                { "playerId": 9, "playerName": "Kim", "wins": 2, "matches": 3, "winRate": 0.667 },
                { "partnerId": 4, "partnerName": "Lee", "wins": 1, "matches": 4, "winRate": null }
            ]
        }))
        .unwrap();

        assert_eq!(stats.partners[0].partner_id, 9);
        assert_eq!(stats.partners[0].effective_win_rate(), 0.667);
        assert_eq!(stats.partners[1].effective_win_rate(), 0.25);
    }
}
