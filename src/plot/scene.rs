//! Turn a height field into 2D drawing primitives.
//!
//! A `Scene` is everything the viewer needs to draw one frame for a given
//! camera, already projected and ordered:
//!
//! - `box_edges`: the 12 edges of the plot box (drawn first)
//! - `patches`: one filled quad per grid cell, far-to-near (painter's order)
//! - `labels`: axis tick labels (drawn last)
//!
//! Keeping this pure means the geometry can be tested without a terminal.

use crate::domain::{Camera, HeightRange, Mesh, HEIGHT_TICKS};
use crate::math::{format_tick, linear_ticks, CoordinateGrid};
use crate::plot::colormap::{coolwarm, Rgb};
use crate::plot::projection::{Projected, Projector};

/// Ticks on each horizontal axis.
const PLANE_TICKS: usize = 5;
/// How far outside the box (world units) horizontal tick labels sit.
const LABEL_OFFSET: f64 = 0.12;
/// Screen-space gap between the height axis and its labels.
const HEIGHT_LABEL_GAP: f64 = 0.04;
/// Approximate label glyph size in screen units at the viewer's usual extent.
const LABEL_CHAR_WIDTH: f64 = 0.025;
const LABEL_LINE_HEIGHT: f64 = 0.08;
/// Upper bound on leftward nudges of the height axis labels.
const MAX_LABEL_SHIFTS: usize = 64;

/// One filled grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePatch {
    pub corners: [(f64, f64); 4],
    pub depth: f64,
    pub color: Rgb,
}

/// Horizontal placement of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub at: (f64, f64),
    pub text: String,
    pub align: LabelAlign,
}

impl AxisLabel {
    /// Approximate screen rectangle `(left, right, bottom, top)` of the text.
    pub fn footprint(&self) -> (f64, f64, f64, f64) {
        let width = self.text.chars().count() as f64 * LABEL_CHAR_WIDTH;
        let (x, y) = self.at;
        let (left, right) = match self.align {
            LabelAlign::Center => (x - width / 2.0, x + width / 2.0),
            LabelAlign::Right => (x - width, x),
        };
        (left, right, y - LABEL_LINE_HEIGHT / 2.0, y + LABEL_LINE_HEIGHT / 2.0)
    }

    pub fn overlaps(&self, other: &AxisLabel) -> bool {
        let (l0, r0, b0, t0) = self.footprint();
        let (l1, r1, b1, t1) = other.footprint();
        l0 < r1 && l1 < r0 && b0 < t1 && b1 < t0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub box_edges: Vec<[(f64, f64); 2]>,
    pub patches: Vec<SurfacePatch>,
    pub labels: Vec<AxisLabel>,
    /// Height tick values, bottom to top (same order as their labels).
    pub height_ticks: Vec<f64>,
}

/// Build the scene for `mesh` sampled on `grid`, seen through `camera`.
pub fn build_scene(mesh: &Mesh, grid: &CoordinateGrid, heights: HeightRange, camera: &Camera) -> Scene {
    let projector = Projector::new(camera, heights);

    let mut scene = Scene {
        box_edges: box_edges(&projector, heights),
        patches: surface_patches(mesh, grid, heights, &projector),
        ..Scene::default()
    };

    let (height_ticks, mut height_labels) = height_axis_labels(&projector, heights);
    let plane_labels = plane_axis_labels(&projector, heights);
    move_clear_of(&mut height_labels, &plane_labels);

    scene.height_ticks = height_ticks;
    scene.labels = plane_labels;
    scene.labels.extend(height_labels);
    scene
}

/// Nudge the height column left until none of it covers an X/Y label.
///
/// The column moves as a whole so the labels stay aligned.
fn move_clear_of(column: &mut [AxisLabel], others: &[AxisLabel]) {
    for _ in 0..MAX_LABEL_SHIFTS {
        let blocked = column.iter().any(|l| others.iter().any(|o| l.overlaps(o)));
        if !blocked {
            return;
        }
        for l in column.iter_mut() {
            l.at.0 -= LABEL_CHAR_WIDTH;
        }
    }
}

fn surface_patches(
    mesh: &Mesh,
    grid: &CoordinateGrid,
    heights: HeightRange,
    projector: &Projector,
) -> Vec<SurfacePatch> {
    let n = mesh.nrows().min(mesh.ncols()).min(grid.len());
    if n < 2 {
        return Vec::new();
    }

    let mut patches = Vec::with_capacity((n - 1) * (n - 1));
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let cell = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let zs = cell.map(|(r, c)| mesh[(r, c)]);
            if zs.iter().any(|z| !z.is_finite()) {
                continue;
            }

            let mean: f64 = zs.iter().map(|z| z / 4.0).sum();
            let Some(t) = heights.normalize(mean) else {
                continue;
            };

            let projected: [Projected; 4] =
                cell.map(|(r, c)| projector.project(grid.x[(r, c)], grid.y[(r, c)], mesh[(r, c)]));
            let depth = projected.iter().map(|p| p.depth).sum::<f64>() / 4.0;

            patches.push(SurfacePatch {
                corners: projected.map(|p| p.screen()),
                depth,
                color: coolwarm(t),
            });
        }
    }

    patches.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    patches
}

fn box_edges(projector: &Projector, heights: HeightRange) -> Vec<[(f64, f64); 2]> {
    let corner = |x: f64, y: f64, h: f64| projector.project(x, y, h).screen();
    let (lo, hi) = (heights.min, heights.max);

    let mut edges = Vec::with_capacity(12);
    for &h in &[lo, hi] {
        edges.push([corner(0.0, 0.0, h), corner(1.0, 0.0, h)]);
        edges.push([corner(1.0, 0.0, h), corner(1.0, 1.0, h)]);
        edges.push([corner(1.0, 1.0, h), corner(0.0, 1.0, h)]);
        edges.push([corner(0.0, 1.0, h), corner(0.0, 0.0, h)]);
    }
    for &(x, y) in &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        edges.push([corner(x, y, lo), corner(x, y, hi)]);
    }
    edges
}

/// Labels for X and Y, placed along the bottom edges nearest the viewer.
fn plane_axis_labels(projector: &Projector, heights: HeightRange) -> Vec<AxisLabel> {
    let floor = heights.min;
    let depth = |x: f64, y: f64| projector.project(x, y, floor).depth;

    // X labels run along y = 0 or y = 1, whichever bottom edge is closer.
    let y_out = if depth(0.5, 0.0) <= depth(0.5, 1.0) {
        -LABEL_OFFSET
    } else {
        1.0 + LABEL_OFFSET
    };
    // Y labels run along x = 0 or x = 1.
    let x_out = if depth(0.0, 0.5) <= depth(1.0, 0.5) {
        -LABEL_OFFSET
    } else {
        1.0 + LABEL_OFFSET
    };

    let ticks = linear_ticks(0.0, 1.0, PLANE_TICKS);
    let mut labels = Vec::with_capacity(2 * ticks.len());
    for &t in &ticks {
        labels.push(AxisLabel {
            at: projector.project(t, y_out, floor).screen(),
            text: format_tick(t),
            align: LabelAlign::Center,
        });
    }
    for &t in &ticks {
        labels.push(AxisLabel {
            at: projector.project(x_out, t, floor).screen(),
            text: format_tick(t),
            align: LabelAlign::Center,
        });
    }
    labels
}

/// Exactly `HEIGHT_TICKS` labels on the leftmost vertical box edge.
fn height_axis_labels(projector: &Projector, heights: HeightRange) -> (Vec<f64>, Vec<AxisLabel>) {
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    let (cx, cy) = corners
        .iter()
        .copied()
        .min_by(|a, b| {
            let pa = projector.project(a.0, a.1, heights.min).x;
            let pb = projector.project(b.0, b.1, heights.min).x;
            pa.total_cmp(&pb)
        })
        .unwrap_or((0.0, 0.0));

    let ticks = linear_ticks(heights.min, heights.max, HEIGHT_TICKS);
    let labels = ticks
        .iter()
        .map(|&v| {
            let (x, y) = projector.project(cx, cy, v).screen();
            AxisLabel {
                at: (x - HEIGHT_LABEL_GAP, y),
                text: format_tick(v),
                align: LabelAlign::Right,
            }
        })
        .collect();
    (ticks, labels)
}
