pub mod forecast;
pub mod health;
pub mod stats;

pub use forecast::get_forecast;
pub use health::get_health;
pub use stats::get_forecast_stats;
