pub mod dashboard;
pub mod matchmaker;

pub use dashboard::{PlayerDashboard, PlayerSnapshot};
pub use matchmaker::{Matchmaker, Seat, SeatFailure, Team, fetch_latest_rank};
