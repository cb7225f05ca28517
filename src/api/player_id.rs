use super::models::PlayerId;
use crate::errors::{ApiError, ApiResult};

/// Anything a caller may hand over as a player id. Integer ids pass through;
/// floating-point ids (as they come from free-form selections) must be
/// finite whole numbers.
pub trait IntoPlayerId {
    fn into_player_id(self, operation: &'static str) -> ApiResult<PlayerId>;
}

impl IntoPlayerId for i64 {
    fn into_player_id(self, _operation: &'static str) -> ApiResult<PlayerId> {
        Ok(self)
    }
}

impl IntoPlayerId for i32 {
    fn into_player_id(self, _operation: &'static str) -> ApiResult<PlayerId> {
        Ok(PlayerId::from(self))
    }
}

impl IntoPlayerId for u32 {
    fn into_player_id(self, _operation: &'static str) -> ApiResult<PlayerId> {
        Ok(PlayerId::from(self))
    }
}

impl IntoPlayerId for f64 {
    fn into_player_id(self, operation: &'static str) -> ApiResult<PlayerId> {
        if !self.is_finite() {
            return Err(ApiError::invalid_argument(
                operation,
                "'player_id' must be a finite number.",
            ));
        }
        if self.fract() != 0.0 || self < PlayerId::MIN as f64 || self >= PlayerId::MAX as f64 {
            return Err(ApiError::invalid_argument(
                operation,
                "'player_id' must be a whole number.",
            ));
        }
        Ok(self as PlayerId)
    }
}
