//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap: the default mode
//! opens the dashboard against a running service, and --serve runs the
//! embedded forecast service instead.

use std::net::SocketAddr;

use clap::Parser;
use thiserror::Error;

use crate::data::{normalize_unit, Unit};
use crate::server::ForecastOptions;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified unit is not recognized
    #[error("Invalid unit: '{0}'. Valid units: c, f")]
    InvalidUnit(String),
}

/// Skycast - synthetic forecast service and terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Synthetic weather forecasts: embedded service and terminal dashboard")]
#[command(version)]
pub struct Cli {
    /// Run the forecast service instead of the dashboard
    #[arg(long)]
    pub serve: bool,

    /// Address the service binds to (with --serve)
    #[arg(long, default_value = "127.0.0.1:5170")]
    pub bind: SocketAddr,

    /// Days served when a request omits the parameter (with --serve)
    #[arg(long, default_value_t = 5)]
    pub default_days: u16,

    /// Upper clamp for the days query parameter (with --serve)
    #[arg(long, default_value_t = 14)]
    pub max_days: u16,

    /// Base URL of the forecast API the dashboard talks to
    #[arg(long, default_value = "http://127.0.0.1:5170/api")]
    pub api_base: String,

    /// Forecast days the dashboard requests initially
    #[arg(long, default_value_t = 7)]
    pub days: u16,

    /// Temperature unit the dashboard requests initially (c or f)
    #[arg(long, default_value = "c")]
    pub unit: String,

    /// Start with the 30s auto-refresh turned off
    #[arg(long)]
    pub no_auto_refresh: bool,
}

/// Configuration derived from CLI arguments for dashboard startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Base URL of the forecast API
    pub api_base: String,
    /// Initial forecast day count
    pub days: u16,
    /// Initial temperature unit
    pub unit: Unit,
    /// Whether auto-refresh starts enabled
    pub auto_refresh: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if an invalid unit was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let unit = normalize_unit(Some(&cli.unit))
            .ok_or_else(|| CliError::InvalidUnit(cli.unit.clone()))?;

        Ok(Self {
            api_base: cli.api_base.clone(),
            days: cli.days,
            unit,
            auto_refresh: !cli.no_auto_refresh,
        })
    }
}

impl Cli {
    /// Generator bounds for serve mode
    pub fn forecast_options(&self) -> ForecastOptions {
        ForecastOptions {
            default_days: self.default_days,
            max_days: self.max_days,
        }
    }
}
