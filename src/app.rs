//! Application state management for the Skycast dashboard
//!
//! This module contains the main application state, handling keyboard input,
//! fetch requests, and the results coming back from the fetch worker.
//!
//! The worker task owns the [`ForecastClient`] (and with it the session
//! cache); the UI talks to it over channels so the render loop never blocks
//! on the network. Each fetch composes its own cancellation with the
//! session-wide token, which fires on teardown.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::StartupConfig;
use crate::data::{compute_stats, ForecastClient, ForecastError, ForecastResponse, ForecastStats, Unit};
use crate::refresh::{self, RefreshConfig, RefreshHandle, RefreshMessage};

/// Most days the dashboard will request (mirrors the service's default clamp)
pub const MAX_DASHBOARD_DAYS: u16 = 14;

/// Connection status shown in the dashboard header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch succeeded
    Success,
    /// Last fetch failed; holds the displayable reason
    Error(String),
}

/// One fetch request from the UI to the worker
#[derive(Debug, Clone, Copy)]
struct FetchRequest {
    days: u16,
    unit: Unit,
}

/// Main application struct managing dashboard state
pub struct App {
    /// Current connection status
    pub status: Status,
    /// Most recently displayed forecast payload
    pub data: Option<ForecastResponse>,
    /// Aggregated stats derived from `data` for the metric cards
    pub stats: Option<ForecastStats>,
    /// Forecast days currently requested
    pub days: u16,
    /// Unit currently displayed
    pub unit: Unit,
    /// Whether the 30s auto-refresh is scheduling
    pub auto_refresh: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Requests to the fetch worker
    requests: mpsc::Sender<FetchRequest>,
    /// Results from the fetch worker
    results: mpsc::Receiver<Result<ForecastResponse, ForecastError>>,
    /// Auto-refresh scheduler
    auto: RefreshHandle,
    /// Session-wide cancellation, fired on teardown
    session: CancellationToken,
}

impl App {
    /// Creates the app, spawning the fetch worker and refresh scheduler.
    pub fn new(client: ForecastClient, config: &StartupConfig) -> Self {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (result_tx, result_rx) = mpsc::channel(8);
        let session = CancellationToken::new();

        spawn_fetch_worker(client, request_rx, result_tx, session.clone());

        let auto = RefreshHandle::spawn(RefreshConfig {
            enabled: config.auto_refresh,
            ..Default::default()
        });

        Self {
            status: Status::Idle,
            data: None,
            stats: None,
            days: config.days,
            unit: config.unit,
            auto_refresh: config.auto_refresh,
            should_quit: false,
            requests: request_tx,
            results: result_rx,
            auto,
            session,
        }
    }

    /// Sends a fetch request for the current filters to the worker.
    pub fn request_fetch(&mut self) {
        self.status = Status::Loading;
        let _ = self.requests.try_send(FetchRequest {
            days: self.days,
            unit: self.unit,
        });
    }

    /// Drains worker results and refresh ticks. Called once per render loop
    /// iteration.
    pub fn poll_updates(&mut self) {
        while let Ok(result) = self.results.try_recv() {
            self.apply_result(result);
        }
        while let Some(RefreshMessage::Tick) = refresh::try_recv(&mut self.auto) {
            self.request_fetch();
        }
    }

    fn apply_result(&mut self, result: Result<ForecastResponse, ForecastError>) {
        match result {
            Ok(response) => {
                self.stats = Some(compute_stats(&response.items));
                self.data = Some(response);
                self.status = Status::Success;
            }
            // A cancelled fetch is a terminal outcome for that call, not a
            // data error; whatever was on screen stays valid.
            Err(ForecastError::Cancelled) => {
                self.status = Status::Idle;
            }
            Err(err) => {
                self.status = Status::Error(err.to_string());
            }
        }
    }

    /// Handles a keyboard event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('r') => self.request_fetch(),
            KeyCode::Char('u') => self.toggle_unit(),
            KeyCode::Char('a') => self.toggle_auto_refresh(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_days(1),
            KeyCode::Char('-') => self.adjust_days(-1),
            _ => {}
        }
    }

    /// Switches between Celsius and Fahrenheit and refetches.
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
        self.request_fetch();
    }

    /// Changes the requested day count, clamped to [1, 14], and refetches
    /// when it actually changed.
    pub fn adjust_days(&mut self, delta: i32) {
        let adjusted = (i32::from(self.days) + delta).clamp(1, i32::from(MAX_DASHBOARD_DAYS)) as u16;
        if adjusted != self.days {
            self.days = adjusted;
            self.request_fetch();
        }
    }

    /// Toggles the auto-refresh schedule. An in-flight fetch keeps running.
    pub fn toggle_auto_refresh(&mut self) {
        self.auto_refresh = !self.auto_refresh;
        self.auto.set_enabled(self.auto_refresh);
    }

    /// Stops the dashboard: clears the refresh scheduler, cancels the
    /// session token so an in-flight fetch unwinds, and marks the loop for
    /// exit.
    pub fn quit(&mut self) {
        self.auto.shutdown();
        self.session.cancel();
        self.should_quit = true;
    }

    /// Relative "last updated" label for the header, derived from the
    /// payload's generation timestamp.
    pub fn last_updated_label(&self) -> Option<String> {
        let generated_at = self.data.as_ref()?.generated_at;
        Some(relative_time(generated_at, Utc::now()))
    }
}

/// Formats how long ago `then` was, relative to `now`.
fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds().max(0);
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    format!("{}h ago", minutes / 60)
}

/// Spawns the worker that owns the client and serves fetch requests one at
/// a time until the session ends.
fn spawn_fetch_worker(
    mut client: ForecastClient,
    mut requests: mpsc::Receiver<FetchRequest>,
    results: mpsc::Sender<Result<ForecastResponse, ForecastError>>,
    session: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = session.cancelled() => break,
                request = requests.recv() => {
                    let Some(request) = request else { break };
                    let result = client
                        .fetch_forecast(
                            Some(request.days),
                            Some(request.unit.as_str()),
                            Some(&session),
                        )
                        .await;
                    if results.send(result).await.is_err() {
                        break;
                    }
                }
            }
        }
    });
}
