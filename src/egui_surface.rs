//! `Surface` implementation over an egui painter.
//!
//! Core coordinates are y-up with the origin at the bottom-left of the target
//! rect; egui is y-down, so every point is flipped on the way out.

use std::f64::consts::TAU;

use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Shape, Stroke};

use crate::geometry::{Path, Point, Rect, Rgba};
use crate::surface::{ArcStroke, Font, Surface, TextMetrics};

/// Flattening step for arcs, in radians.
const ARC_STEP: f64 = TAU / 96.0;
const MAX_ARC_POINTS: usize = 1024;

pub struct EguiSurface<'a> {
    painter: &'a Painter,
    screen: egui::Rect,
    clip: Option<Path>,
    saved: Vec<Option<Path>>,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, screen: egui::Rect) -> Self {
        Self {
            painter,
            screen,
            clip: None,
            saved: Vec::new(),
        }
    }

    /// The target rect in core coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen.width() as f64, self.screen.height() as f64)
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        egui::pos2(
            self.screen.min.x + point.x as f32,
            self.screen.max.y - point.y as f32,
        )
    }

    fn rect_to_screen(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(Point::new(rect.x, rect.max_y())),
            self.to_screen(Point::new(rect.max_x(), rect.y)),
        )
    }
}

pub fn color32(color: Rgba) -> Color32 {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(byte(color.r), byte(color.g), byte(color.b), byte(color.a))
}

pub fn rgba(color: Color32) -> Rgba {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let channel = |c: u8| c as f32 / 255.0;
    Rgba {
        r: channel(r),
        g: channel(g),
        b: channel(b),
        a: channel(a),
    }
}

/// Covers the even-odd interior of `polygon` inside `rect` with trapezoids.
///
/// Each trapezoid is `[bottom-left, bottom-right, top-right, top-left]` between
/// two consecutive vertex x positions.
pub fn fill_trapezoids(polygon: &[Point], rect: Rect) -> Vec<[Point; 4]> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let (left, right) = (rect.x, rect.max_x());
    let mut xs: Vec<f64> = polygon
        .iter()
        .map(|p| p.x.clamp(left, right))
        .chain([left, right])
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let edges: Vec<(Point, Point)> = (0..n)
        .map(|i| (polygon[i], polygon[(i + 1) % n]))
        .filter(|(a, b)| a.x != b.x)
        .collect();
    let y_at = |(a, b): &(Point, Point), x: f64| a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x);
    let clamp_y = |y: f64| y.clamp(rect.y, rect.max_y());

    let mut out = Vec::new();
    for slab in xs.windows(2) {
        let (xa, xb) = (slab[0], slab[1]);
        if xb - xa <= f64::EPSILON {
            continue;
        }
        let xm = (xa + xb) / 2.0;
        let mut crossings: Vec<(f64, f64, f64)> = edges
            .iter()
            .filter(|(a, b)| a.x.min(b.x) <= xm && xm < a.x.max(b.x))
            .map(|edge| (y_at(edge, xm), y_at(edge, xa), y_at(edge, xb)))
            .collect();
        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        for pair in crossings.chunks_exact(2) {
            let (lower, upper) = (pair[0], pair[1]);
            out.push([
                Point::new(xa, clamp_y(lower.1)),
                Point::new(xb, clamp_y(lower.2)),
                Point::new(xb, clamp_y(upper.2)),
                Point::new(xa, clamp_y(upper.1)),
            ]);
        }
    }
    out
}

impl TextMetrics for EguiSurface<'_> {
    fn measure_text_width(&self, text: &str, font: &Font) -> f64 {
        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            FontId::proportional(font.size as f32),
            Color32::WHITE,
        );
        galley.size().x as f64
    }
}

impl Surface for EguiSurface<'_> {
    fn save_state(&mut self) {
        self.saved.push(self.clip.clone());
    }

    fn restore_state(&mut self) {
        self.clip = self.saved.pop().flatten();
    }

    fn clip_to_path(&mut self, path: &Path) {
        self.clip = Some(path.clone());
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba, alpha: f32) {
        let fill = color32(color.with_alpha(alpha));
        let Some(clip) = &self.clip else {
            self.painter.rect_filled(self.rect_to_screen(rect), 0.0, fill);
            return;
        };
        if !clip.is_finite() {
            log::trace!("skipping fill with non-finite clip path");
            return;
        }

        let polygon: Vec<Point> = clip.points().collect();
        let mut mesh = Mesh::default();
        for quad in fill_trapezoids(&polygon, rect) {
            let base = mesh.vertices.len() as u32;
            for corner in quad {
                mesh.colored_vertex(self.to_screen(corner), fill);
            }
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        if !mesh.is_empty() {
            self.painter.add(Shape::mesh(mesh));
        }
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f64) {
        if !path.is_finite() {
            log::trace!("skipping stroke with non-finite path");
            return;
        }
        let mut points: Vec<Pos2> = path.points().map(|p| self.to_screen(p)).collect();
        if path.is_closed() {
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
        }
        if points.len() < 2 {
            return;
        }
        self.painter
            .add(Shape::line(points, Stroke::new(width as f32, color32(color))));
    }

    fn stroke_arc(&mut self, arc: &ArcStroke, color: Rgba) {
        let sweep = if arc.clockwise {
            -(arc.start_angle - arc.end_angle).rem_euclid(TAU)
        } else {
            arc.sweep()
        };
        if !sweep.is_finite() || !arc.radius.is_finite() || arc.radius <= 0.0 {
            log::trace!("skipping degenerate arc {arc:?}");
            return;
        }

        let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).clamp(1, MAX_ARC_POINTS);
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let angle = arc.start_angle + sweep * i as f64 / steps as f64;
                self.to_screen(Point::new(
                    arc.center.x + arc.radius * angle.cos(),
                    arc.center.y + arc.radius * angle.sin(),
                ))
            })
            .collect();
        self.painter
            .add(Shape::line(points, Stroke::new(arc.width as f32, color32(color))));
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font: &Font, color: Rgba) {
        self.painter.text(
            self.rect_to_screen(rect).center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(font.size as f32),
            color32(color),
        );
    }
}
