//! Segmented ring gauge with an optional percentage in the middle.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::{Rect, Rgba};
use crate::notify::ChangeNotifier;
use crate::segments::{Segment, SegmentSet};
use crate::surface::{ArcStroke, DrawOp, DrawOps, Font, LineCap, Surface, TextMetrics, replay};

const ARC_WIDTH: f64 = 7.0;
const LABEL_FONT_SIZE: f64 = 15.0;
const LABEL_HEIGHT: f64 = 12.0;
/// 12 o'clock in y-up coordinates.
const START_ANGLE: f64 = FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStyle {
    pub arc_width: f64,
    pub remainder_color: Rgba,
    pub dark_mode: bool,
    /// Label color in light mode; dark mode always uses white.
    pub text_color: Rgba,
    pub font: Font,
    pub label_height: f64,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            arc_width: ARC_WIDTH,
            remainder_color: Rgba::LIGHT_GRAY.with_alpha(0.5),
            dark_mode: false,
            text_color: Rgba::BLACK,
            font: Font::new(LABEL_FONT_SIZE),
            label_height: LABEL_HEIGHT,
        }
    }
}

impl RingStyle {
    pub fn label_color(&self) -> Rgba {
        if self.dark_mode {
            Rgba::WHITE
        } else {
            self.text_color
        }
    }
}

/// One arc of the ring, in the order it is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpan {
    /// Position of the segment in the working list.
    pub index: usize,
    pub arc: ArcStroke,
    pub color: Rgba,
}

/// Lays out `working` around the ring, last segment first.
///
/// Each segment sweeps `value * 2π` counter-clockwise from where the previous
/// one ended. Totals above one wrap past the start and overdraw.
pub fn arc_spans(working: &[Segment], bounds: Rect, arc_width: f64) -> Vec<ArcSpan> {
    let center = bounds.center();
    let radius = (bounds.min_side() - arc_width) / 2.0;

    let mut previous_angle = START_ANGLE;
    let mut spans = Vec::with_capacity(working.len());
    for (index, segment) in working.iter().enumerate().rev() {
        let current_angle = previous_angle + segment.value * TAU;
        spans.push(ArcSpan {
            index,
            arc: ArcStroke {
                center,
                radius,
                start_angle: previous_angle,
                end_angle: current_angle,
                width: arc_width,
                cap: LineCap::Butt,
                clockwise: false,
            },
            color: segment.color,
        });
        previous_angle = current_angle;
    }
    spans
}

/// Whole percent, truncated toward zero: `0.999` reads `99%`.
pub fn center_label(value: f64) -> String {
    format!("{}%", (value * 100.0) as i64)
}

pub fn ring_ops<M: TextMetrics + ?Sized>(
    segments: &SegmentSet,
    bounds: Rect,
    style: &RingStyle,
    metrics: &M,
) -> DrawOps {
    let working = segments.normalized(style.remainder_color);
    let mut ops: DrawOps = arc_spans(&working, bounds, style.arc_width)
        .into_iter()
        .map(|span| DrawOp::StrokeArc {
            arc: span.arc,
            color: span.color,
        })
        .collect();

    if let Some(value) = segments.center_value() {
        let text = center_label(value);
        let width = metrics.measure_text_width(&text, &style.font);
        let rect = Rect::new(
            bounds.x + (bounds.width - width) / 2.0,
            bounds.y + (bounds.height - style.label_height) / 2.0,
            width,
            style.label_height,
        );
        ops.push(DrawOp::DrawText {
            text,
            rect,
            font: style.font,
            color: style.label_color(),
        });
    }
    ops
}

#[derive(Debug)]
pub struct RingChart {
    segments: SegmentSet,
    style: RingStyle,
    notifier: ChangeNotifier,
}

impl RingChart {
    pub fn new(initial_segments: Vec<Segment>) -> Self {
        Self {
            segments: SegmentSet::new(initial_segments),
            style: RingStyle::default(),
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn on_data_changed(&mut self, listener: impl FnMut() + Send + 'static) {
        self.notifier.set_listener(listener);
    }

    pub fn replace_segments(&mut self, segments: Vec<Segment>) {
        self.segments.replace(segments);
        self.notifier.notify();
    }

    pub fn set_center_value(&mut self, value: Option<f64>) {
        self.segments.set_center_value(value);
        self.notifier.notify();
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    pub fn style(&self) -> &RingStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: RingStyle) {
        self.style = style;
        self.notifier.notify();
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        if self.style.dark_mode != dark_mode {
            self.style.dark_mode = dark_mode;
            self.notifier.notify();
        }
    }

    pub fn draw_ops<M: TextMetrics + ?Sized>(&self, bounds: Rect, metrics: &M) -> DrawOps {
        ring_ops(&self.segments, bounds, &self.style, metrics)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, bounds: Rect) {
        let ops = self.draw_ops(bounds, &*surface);
        replay(&ops, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::surface::RecordingSurface;

    const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
    const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);

    #[test]
    fn geometry_uses_smaller_side() {
        let spans = arc_spans(&[Segment::new(1.0, RED)], Rect::new(0.0, 0.0, 60.0, 40.0), 7.0);
        assert_eq!(spans.len(), 1);
        let arc = spans[0].arc;
        assert_eq!(arc.center, Point::new(30.0, 20.0));
        assert!((arc.radius - 16.5).abs() < 1e-9);
        assert_eq!(arc.cap, LineCap::Butt);
        assert!(!arc.clockwise);
        assert!((arc.start_angle - FRAC_PI_2).abs() < 1e-12);
        assert!((arc.sweep() - TAU).abs() < 1e-9);
    }

    #[test]
    fn spans_run_in_reverse_list_order_and_chain() {
        let working = [
            Segment::new(0.3, RED),
            Segment::new(0.2, BLUE),
            Segment::new(0.5, Rgba::LIGHT_GRAY),
        ];
        let spans = arc_spans(&working, Rect::new(0.0, 0.0, 50.0, 50.0), 7.0);
        let order: Vec<usize> = spans.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![2, 1, 0]);

        for pair in spans.windows(2) {
            assert_eq!(pair[0].arc.end_angle, pair[1].arc.start_angle);
        }
        for span in &spans {
            assert!((span.arc.sweep() - working[span.index].value * TAU).abs() < 1e-9);
        }
        let last = spans.last().unwrap().arc.end_angle;
        assert!((last - START_ANGLE - TAU).abs() < 1e-9);
    }

    #[test]
    fn overfull_totals_overdraw_without_looping() {
        let working = [Segment::new(0.8, RED), Segment::new(0.7, BLUE)];
        let spans = arc_spans(&working, Rect::new(0.0, 0.0, 20.0, 20.0), 7.0);
        assert_eq!(spans.len(), 2);
        let swept = spans[1].arc.end_angle - START_ANGLE;
        assert!((swept - 1.5 * TAU).abs() < 1e-9);
    }

    #[test]
    fn label_truncates() {
        assert_eq!(center_label(0.5), "50%");
        assert_eq!(center_label(0.999), "99%");
        assert_eq!(center_label(1.0), "100%");
        assert_eq!(center_label(0.0), "0%");
        assert_eq!(center_label(f64::NAN), "0%");
    }

    #[test]
    fn label_is_centered_with_measured_width() {
        let mut chart = RingChart::new(vec![Segment::new(1.0, RED)]);
        chart.set_center_value(Some(0.5));
        let surface = RecordingSurface::new(0.5);
        let ops = chart.draw_ops(Rect::new(0.0, 0.0, 100.0, 60.0), &surface);

        let Some(DrawOp::DrawText {
            text,
            rect,
            font,
            color,
        }) = ops.last()
        else {
            panic!("expected the label last");
        };
        // "50%" at 15pt with a 0.5em advance is 22.5 wide.
        assert_eq!(text, "50%");
        assert_eq!(*rect, Rect::new(38.75, 24.0, 22.5, 12.0));
        assert_eq!(font.size, 15.0);
        assert_eq!(*color, Rgba::BLACK);
    }

    #[test]
    fn dark_mode_labels_are_white() {
        let mut chart = RingChart::new(Vec::new());
        chart.set_center_value(Some(0.25));
        chart.set_dark_mode(true);
        let mut surface = RecordingSurface::default();
        chart.draw(&mut surface, Rect::new(0.0, 0.0, 40.0, 40.0));
        let Some(DrawOp::DrawText { color, .. }) = surface.ops().last() else {
            panic!("expected the label last");
        };
        assert_eq!(*color, Rgba::WHITE);
    }

    #[test]
    fn no_center_value_means_no_text() {
        let chart = RingChart::new(vec![Segment::new(0.4, RED)]);
        let ops = chart.draw_ops(Rect::new(0.0, 0.0, 40.0, 40.0), &RecordingSurface::default());
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(op, DrawOp::StrokeArc { .. })));
    }

    #[test]
    fn drawing_leaves_stored_segments_untouched() {
        let chart = RingChart::new(vec![Segment::new(0.4, RED)]);
        let _ = chart.draw_ops(Rect::new(0.0, 0.0, 40.0, 40.0), &RecordingSurface::default());
        assert_eq!(chart.segments().segments().len(), 1);
    }
}
