//! The canvas abstraction renderers draw onto.

use crate::geometry::{Path, Point, Rect, Rgba};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub size: f64,
}

impl Font {
    pub const fn new(size: f64) -> Self {
        Self { size }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// A stroked circular arc from `start_angle` to `end_angle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcStroke {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub width: f64,
    pub cap: LineCap,
    pub clockwise: bool,
}

impl ArcStroke {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

pub trait TextMetrics {
    fn measure_text_width(&self, text: &str, font: &Font) -> f64;
}

pub trait Surface: TextMetrics {
    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn clip_to_path(&mut self, path: &Path);
    fn fill_rect(&mut self, rect: Rect, color: Rgba, alpha: f32);
    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f64);
    fn stroke_arc(&mut self, arc: &ArcStroke, color: Rgba);
    fn draw_text(&mut self, text: &str, rect: Rect, font: &Font, color: Rgba);
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    SaveState,
    RestoreState,
    ClipToPath(Path),
    FillRect {
        rect: Rect,
        color: Rgba,
        alpha: f32,
    },
    StrokePath {
        path: Path,
        color: Rgba,
        width: f64,
    },
    StrokeArc {
        arc: ArcStroke,
        color: Rgba,
    },
    DrawText {
        text: String,
        rect: Rect,
        font: Font,
        color: Rgba,
    },
}

pub type DrawOps = Vec<DrawOp>;

pub fn replay<S: Surface + ?Sized>(ops: &[DrawOp], surface: &mut S) {
    for op in ops {
        match op {
            DrawOp::SaveState => surface.save_state(),
            DrawOp::RestoreState => surface.restore_state(),
            DrawOp::ClipToPath(path) => surface.clip_to_path(path),
            DrawOp::FillRect { rect, color, alpha } => surface.fill_rect(*rect, *color, *alpha),
            DrawOp::StrokePath { path, color, width } => surface.stroke_path(path, *color, *width),
            DrawOp::StrokeArc { arc, color } => surface.stroke_arc(arc, *color),
            DrawOp::DrawText {
                text,
                rect,
                font,
                color,
            } => surface.draw_text(text, *rect, font, *color),
        }
    }
}

/// Headless surface that keeps every call it receives.
///
/// Text is measured with a fixed advance per character, scaled by font size.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    ops: DrawOps,
    advance_em: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl RecordingSurface {
    pub fn new(advance_em: f64) -> Self {
        Self {
            ops: Vec::new(),
            advance_em,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> DrawOps {
        std::mem::take(&mut self.ops)
    }
}

impl TextMetrics for RecordingSurface {
    fn measure_text_width(&self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size * self.advance_em
    }
}

impl Surface for RecordingSurface {
    fn save_state(&mut self) {
        self.ops.push(DrawOp::SaveState);
    }

    fn restore_state(&mut self) {
        self.ops.push(DrawOp::RestoreState);
    }

    fn clip_to_path(&mut self, path: &Path) {
        self.ops.push(DrawOp::ClipToPath(path.clone()));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba, alpha: f32) {
        self.ops.push(DrawOp::FillRect { rect, color, alpha });
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f64) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            color,
            width,
        });
    }

    fn stroke_arc(&mut self, arc: &ArcStroke, color: Rgba) {
        self.ops.push(DrawOp::StrokeArc { arc: *arc, color });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font: &Font, color: Rgba) {
        self.ops.push(DrawOp::DrawText {
            text: text.to_string(),
            rect,
            font: *font,
            color,
        });
    }
}
