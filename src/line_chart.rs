//! Scrolling line chart with a filled area under the line.

use crate::geometry::{Path, Point, Rect, Rgba};
use crate::notify::ChangeNotifier;
use crate::samples::SampleBuffer;
use crate::surface::{DrawOp, DrawOps, Surface, replay};

const TRANSPARENT_FILL_ALPHA: f32 = 0.5;
const OPAQUE_FILL_ALPHA: f32 = 0.8;
const LINE_WIDTH: f64 = 0.5;
/// Vertical inset keeping a zero-valued line inside the bounds.
const BASELINE_INSET: f64 = 0.5;

/// Line color and width, plus the transparency flag that picks the fill alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub line_width: f64,
    transparent: bool,
}

impl LineStyle {
    pub fn new(color: Rgba, transparent: bool) -> Self {
        Self {
            color,
            line_width: LINE_WIDTH,
            transparent,
        }
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn set_transparent(&mut self, transparent: bool) {
        self.transparent = transparent;
    }

    /// Fill alpha under the line: 0.5 when transparent, 0.8 otherwise.
    pub fn base_alpha(&self) -> f32 {
        if self.transparent {
            TRANSPARENT_FILL_ALPHA
        } else {
            OPAQUE_FILL_ALPHA
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(Rgba::ACCENT, true)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinePaths {
    /// Polyline through every sample.
    pub stroke: Path,
    /// The polyline closed down to the bottom edge.
    pub fill: Path,
}

/// Maps samples into `bounds`. Returns `None` for an empty slice.
///
/// Values are expected in `0.0..=1.0` but are not clamped; out-of-range and
/// non-finite values produce points outside the bounds.
pub fn line_paths(values: &[f64], bounds: Rect) -> Option<LinePaths> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let step = bounds.width / n as f64;
    let x = |i: usize| bounds.x + i as f64 * step;
    let y = |v: f64| bounds.y + BASELINE_INSET + v * (bounds.height - BASELINE_INSET);

    let mut stroke = Path::with_capacity(n);
    stroke.move_to(Point::new(x(0), y(values[0])));
    for (i, value) in values.iter().enumerate().skip(1) {
        stroke.line_to(Point::new(x(i), y(*value)));
    }

    let mut fill = stroke.clone();
    fill.line_to(Point::new(x(n - 1), bounds.y));
    fill.line_to(Point::new(x(0), bounds.y));
    fill.close();

    Some(LinePaths { stroke, fill })
}

/// Emits the fill-then-stroke sequence for one paint.
pub fn line_ops(values: &[f64], bounds: Rect, style: &LineStyle) -> DrawOps {
    let Some(paths) = line_paths(values, bounds) else {
        return Vec::new();
    };
    vec![
        DrawOp::SaveState,
        DrawOp::ClipToPath(paths.fill),
        DrawOp::FillRect {
            rect: bounds,
            color: style.color,
            alpha: style.base_alpha(),
        },
        DrawOp::RestoreState,
        DrawOp::StrokePath {
            path: paths.stroke,
            color: style.color.with_alpha(1.0),
            width: style.line_width,
        },
    ]
}

#[derive(Debug)]
pub struct LineChart {
    buffer: SampleBuffer,
    style: LineStyle,
    notifier: ChangeNotifier,
}

impl LineChart {
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, transparent: bool, color: Rgba) -> Self {
        Self::with_buffer(SampleBuffer::new(capacity), LineStyle::new(color, transparent))
    }

    pub fn with_buffer(buffer: SampleBuffer, style: LineStyle) -> Self {
        Self {
            buffer,
            style,
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn on_data_changed(&mut self, listener: impl FnMut() + Send + 'static) {
        self.notifier.set_listener(listener);
    }

    pub fn append(&mut self, value: f64) {
        self.buffer.append(value);
        self.notifier.notify();
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: LineStyle) {
        self.style = style;
        self.notifier.notify();
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.style.color = color;
        self.notifier.notify();
    }

    pub fn set_transparent(&mut self, transparent: bool) {
        self.style.set_transparent(transparent);
        self.notifier.notify();
    }

    pub fn draw_ops(&self, bounds: Rect) -> DrawOps {
        line_ops(self.buffer.values(), bounds, &self.style)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, bounds: Rect) {
        replay(&self.draw_ops(bounds), surface);
    }
}
