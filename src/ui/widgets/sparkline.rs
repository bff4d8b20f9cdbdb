//! Temperature sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperature levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline widget showing temperatures across the forecast days
pub struct TemperatureSparkline<'a> {
    /// Temperature for each forecast day, in the display unit
    values: &'a [i32],
    /// Style for the sparkline
    style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(values: &'a [i32]) -> Self {
        Self {
            values,
            style: Style::default().fg(Color::Cyan),
        }
    }

    #[allow(dead_code)]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Maps a value onto a block character, scaled between the series
    /// extrema. Temperatures can be negative, so the scale is anchored to
    /// the observed range rather than zero. A flat series renders mid-block.
    fn value_to_block(value: i32, min: i32, max: i32) -> char {
        if max == min {
            return BLOCKS[3];
        }
        let normalized = f64::from(value - min) / f64::from(max - min);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.values.is_empty() {
            return;
        }

        let min = self.values.iter().copied().min().unwrap_or(0);
        let max = self.values.iter().copied().max().unwrap_or(0);

        for (i, value) in self.values.iter().take(area.width as usize).enumerate() {
            let block = Self::value_to_block(*value, min, max);
            let x = area.x + i as u16;

            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(block).set_style(self.style);
            }
        }
    }
}
