//! Dashboard screen rendering
//!
//! Lays out the header with connection status, the metric cards derived
//! from the current forecast, a temperature sparkline, the forecast table
//! and the key help footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Status};
use crate::data::{ForecastItem, Unit};

use super::widgets::TemperatureSparkline;

const DEGREE: char = '°';

/// Renders the full dashboard screen
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(5), // metric cards
            Constraint::Length(3), // sparkline
            Constraint::Min(4),    // forecast table
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_metrics(frame, app, chunks[1]);
    render_sparkline(frame, app, chunks[2]);
    render_table(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

fn status_span(status: &Status) -> Span<'_> {
    match status {
        Status::Idle => Span::styled("idle", Style::default().fg(Color::DarkGray)),
        Status::Loading => Span::styled("loading…", Style::default().fg(Color::Yellow)),
        Status::Success => Span::styled("connected", Style::default().fg(Color::Green)),
        Status::Error(reason) => Span::styled(
            format!("error: {reason}"),
            Style::default().fg(Color::Red),
        ),
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "Skycast",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status_span(&app.status),
    ];
    if let Some(label) = app.last_updated_label() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("updated {label}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Picks the temperature for the display unit
fn display_temperature(item: &ForecastItem, unit: Unit) -> i32 {
    match unit {
        Unit::C => item.temperature_c,
        Unit::F => item.temperature_f,
    }
}

fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let unit_label = app.unit.as_str().to_uppercase();
    let (avg, min, max) = match &app.stats {
        Some(stats) => match app.unit {
            Unit::C => (
                format!("{:.1}", stats.avg_c),
                stats.min_c.to_string(),
                stats.max_c.to_string(),
            ),
            Unit::F => (
                format!("{:.1}", stats.avg_f),
                stats.min_f.to_string(),
                stats.max_f.to_string(),
            ),
        },
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };

    render_metric_card(frame, cards[0], "Avg temp", &avg, &unit_label);
    render_metric_card(frame, cards[1], "Min temp", &min, &unit_label);
    render_metric_card(frame, cards[2], "Max temp", &max, &unit_label);
}

fn render_metric_card(frame: &mut Frame, area: Rect, label: &str, value: &str, unit: &str) {
    let text = if value == "-" {
        value.to_string()
    } else {
        format!("{value} {DEGREE}{unit}")
    };

    let card = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(label));
    frame.render_widget(card, area);
}

fn render_sparkline(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Trend");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(data) = &app.data {
        let values: Vec<i32> = data
            .items
            .iter()
            .map(|item| display_temperature(item, app.unit))
            .collect();
        frame.render_widget(TemperatureSparkline::new(&values), inner);
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let unit_label = app.unit.as_str().to_uppercase();
    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from(format!("{DEGREE}C")),
        Cell::from(format!("{DEGREE}F")),
        Cell::from("Summary"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .data
        .iter()
        .flat_map(|data| data.items.iter())
        .map(|item| {
            Row::new(vec![
                Cell::from(item.date.to_string()),
                Cell::from(item.temperature_c.to_string()),
                Cell::from(item.temperature_f.to_string()),
                Cell::from(item.summary.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Forecast ({} days, {DEGREE}{unit_label})", app.days)),
    );

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let auto = if app.auto_refresh { "on" } else { "off" };
    let footer = Paragraph::new(format!(
        "r refresh  u unit  +/- days  a auto-refresh ({auto})  q quit"
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
