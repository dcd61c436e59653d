//! Color bar legend drawn directly into the Ratatui buffer.
//!
//! The bar is half as tall as the plot (shrink 0.5), vertically centered, and
//! five times taller than wide. Terminal cells are roughly twice as tall as
//! they are wide, so the width in cells is `2 * height / 5`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::HeightRange;
use crate::math::{format_tick, linear_ticks};
use crate::plot::coolwarm;

/// Width of the column reserved for the bar and its labels.
pub const COLORBAR_COLUMN_WIDTH: u16 = 16;

const SHRINK: f64 = 0.5;
const ASPECT: f64 = 5.0;
const CELL_ASPECT: f64 = 2.0;
const TICKS: usize = 5;
/// Gap plus room for labels such as `-123.45`.
const LABEL_SPACE: u16 = 9;

/// Rectangle occupied by the gradient inside `area`, if it fits.
pub fn colorbar_rect(area: Rect) -> Option<Rect> {
    if area.width < LABEL_SPACE + 2 || area.height < 2 {
        return None;
    }

    let height = ((area.height as f64 * SHRINK).round() as u16).max(1);
    let max_width = area.width - LABEL_SPACE - 1;
    let width = ((height as f64 * CELL_ASPECT / ASPECT).round() as u16).clamp(1, max_width);

    Some(Rect {
        x: area.x + 1,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    })
}

/// Value shown by bar row `row` (0 = top) of a bar `rows` tall.
pub fn row_value(heights: HeightRange, row: u16, rows: u16) -> f64 {
    let t = 1.0 - (row as f64 + 0.5) / rows.max(1) as f64;
    heights.lerp(t)
}

pub struct ColorBar {
    pub heights: HeightRange,
}

impl Widget for ColorBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(bar) = colorbar_rect(area) else {
            return;
        };
        let fill = " ".repeat(bar.width as usize);

        for row in 0..bar.height {
            let v = row_value(self.heights, row, bar.height);
            let t = self.heights.normalize(v).unwrap_or(0.5);
            let c = coolwarm(t);
            buf.set_string(
                bar.x,
                bar.y + row,
                &fill,
                Style::default().bg(Color::Rgb(c.r, c.g, c.b)),
            );
        }

        let label_x = bar.x + bar.width + 1;
        if label_x >= area.x + area.width {
            return;
        }
        let max_len = (area.x + area.width - label_x) as usize;
        let style = Style::default().fg(Color::Gray);
        let span = (bar.height - 1) as f64;

        for v in linear_ticks(self.heights.min, self.heights.max, TICKS) {
            let u = 1.0 - self.heights.fraction(v);
            let y = bar.y + (u * span).round() as u16;
            buf.set_stringn(label_x, y, format_tick(v), max_len, style);
        }
    }
}
