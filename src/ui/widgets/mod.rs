pub mod sparkline;

pub use sparkline::TemperatureSparkline;
