//! Plotters-powered 3D surface widget for Ratatui.
//!
//! All geometry (projection, painter's ordering, tick placement) is computed
//! up front in `plot::scene`; this widget only rasterizes the scene into the
//! Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{LabelAlign, Rgb, Scene};

const BOX_COLOR: RGBColor = RGBColor(110, 110, 110);

/// A render-only view of a projected scene.
pub struct SurfaceChart<'a> {
    pub scene: &'a Scene,
    /// Half-width of the square drawing range in projected units.
    pub extent: f64,
}

impl<'a> Widget for SurfaceChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Plot area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let r = self.extent;
        if !r.is_finite() || r <= 0.0 {
            return;
        }
        let scene = self.scene;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(-r..r, -r..r)?;

            // 1) Plot box, behind everything.
            chart.draw_series(
                scene
                    .box_edges
                    .iter()
                    .map(|e| PathElement::new(vec![e[0], e[1]], &BOX_COLOR)),
            )?;

            // 2) Surface cells, far to near. Filled, no outline.
            chart.draw_series(
                scene
                    .patches
                    .iter()
                    .map(|p| Polygon::new(p.corners.to_vec(), to_plotters(p.color).filled())),
            )?;

            // 3) Tick labels on top.
            chart.draw_series(scene.labels.iter().map(|l| {
                let h = match l.align {
                    LabelAlign::Center => HPos::Center,
                    LabelAlign::Right => HPos::Right,
                };
                let style = ("sans-serif", 10)
                    .into_font()
                    .color(&WHITE)
                    .pos(Pos::new(h, VPos::Center));
                Text::new(l.text.clone(), l.at, style)
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn to_plotters(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::{Camera, HeightRange, Mesh};
    use crate::math::CoordinateGrid;
    use crate::plot::{build_scene, projection::box_radius};

    fn cell_color(buf: &Buffer, x: u16, y: u16) -> Option<(u8, u8, u8)> {
        let cell = &buf[(x, y)];
        [cell.fg, cell.bg].into_iter().find_map(|c| match c {
            Color::Rgb(r, g, b) => Some((r, g, b)),
            _ => None,
        })
    }

    #[test]
    fn gradient_surface_renders_warm_and_cool_cells() {
        let mesh = Mesh::from_fn(10, 10, |i, j| (i + j) as f64);
        let grid = CoordinateGrid::unit_square(10);
        let heights = HeightRange::from_mesh(&mesh);
        let scene = build_scene(&mesh, &grid, heights, &Camera::default());
        assert_eq!(scene.patches.len(), 81);

        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        SurfaceChart {
            scene: &scene,
            extent: box_radius() * 1.25,
        }
        .render(area, &mut buf);

        let (mut warm, mut cool) = (0, 0);
        for y in 0..area.height {
            for x in 0..area.width {
                match cell_color(&buf, x, y) {
                    Some((r, _, b)) if r as i32 > b as i32 + 40 => warm += 1,
                    Some((r, _, b)) if b as i32 > r as i32 + 40 => cool += 1,
                    _ => {}
                }
            }
        }
        assert!(warm > 0, "no warm cells rendered");
        assert!(cool > 0, "no cool cells rendered");
    }

    #[test]
    fn small_areas_show_a_resize_hint() {
        let mesh = Mesh::from_fn(3, 3, |i, _| i as f64);
        let grid = CoordinateGrid::unit_square(3);
        let scene = build_scene(&mesh, &grid, HeightRange::from_mesh(&mesh), &Camera::default());

        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        SurfaceChart {
            scene: &scene,
            extent: box_radius() * 1.25,
        }
        .render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row.starts_with("Plot area too small"));
    }
}
