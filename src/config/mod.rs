pub mod settings;

pub use settings::{AppConfig, ApiSettings, ChartSettings, RatingSettings, DAY_MS};
