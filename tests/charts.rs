use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pulse_charts::ring_chart::{arc_spans, center_label};
use pulse_charts::{
    DrawOp, LineChart, Rect, RecordingSurface, Rgba, RingChart, RingStyle, SampleBuffer, Segment,
    SegmentSet,
};

const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);

fn neutral() -> Rgba {
    RingStyle::default().remainder_color
}

fn arc_colors(ops: &[DrawOp]) -> Vec<Rgba> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::StrokeArc { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[test]
fn scenario_a_buffer_keeps_last_five() {
    let mut buffer = SampleBuffer::new(5);
    for value in [0.1, 0.9, 0.3, 0.7, 0.2, 0.5] {
        buffer.append(value);
    }
    assert_eq!(buffer.values(), &[0.9, 0.3, 0.7, 0.2, 0.5]);
}

#[test]
fn buffer_length_is_constant_and_tracks_last_appends() {
    for capacity in [1usize, 2, 7, 32] {
        let mut buffer = SampleBuffer::new(capacity);
        let appended: Vec<f64> = (0..capacity * 3).map(|k| k as f64 / 100.0).collect();
        for (k, value) in appended.iter().enumerate() {
            buffer.append(*value);
            assert_eq!(buffer.len(), capacity);
            if k + 1 >= capacity {
                assert_eq!(buffer.values(), &appended[k + 1 - capacity..=k]);
            }
        }
    }
}

#[test]
fn line_path_has_one_point_per_sample() {
    let bounds = Rect::new(3.0, 0.0, 90.0, 30.0);
    let mut chart = LineChart::new(9, true, Rgba::ACCENT);
    for k in 0..9 {
        chart.append(k as f64 / 9.0);
    }

    let mut surface = RecordingSurface::default();
    chart.draw(&mut surface, bounds);
    let Some(DrawOp::StrokePath { path, .. }) = surface.ops().last() else {
        panic!("stroke should be the final op");
    };
    let xs: Vec<f64> = path.points().map(|p| p.x).collect();
    assert_eq!(xs.len(), 9);
    for pair in xs.windows(2) {
        assert!((pair[1] - pair[0] - 10.0).abs() < 1e-9);
    }
    assert!((xs[0] - 3.0).abs() < 1e-9);
}

#[test]
fn scenario_b_remainder_and_reverse_stroke_order() {
    let set = SegmentSet::new(vec![Segment::new(0.3, RED), Segment::new(0.2, BLUE)]);
    let working = set.normalized(neutral());
    assert_eq!(working.len(), 3);
    assert_eq!(working[0], Segment::new(0.3, RED));
    assert_eq!(working[1], Segment::new(0.2, BLUE));
    assert!((working[2].value - 0.5).abs() < 1e-9);
    assert_eq!(working[2].color, neutral());

    let chart = RingChart::new(vec![Segment::new(0.3, RED), Segment::new(0.2, BLUE)]);
    let ops = chart.draw_ops(Rect::new(0.0, 0.0, 80.0, 80.0), &RecordingSurface::default());
    assert_eq!(arc_colors(&ops), vec![neutral(), BLUE, RED]);
}

#[test]
fn scenario_c_empty_set_is_one_neutral_circle() {
    let chart = RingChart::new(Vec::new());
    let ops = chart.draw_ops(Rect::new(0.0, 0.0, 50.0, 50.0), &RecordingSurface::default());
    assert_eq!(ops.len(), 1);
    let DrawOp::StrokeArc { arc, color } = &ops[0] else {
        panic!("expected a single arc");
    };
    assert_eq!(*color, neutral());
    assert!((arc.start_angle - FRAC_PI_2).abs() < 1e-12);
    assert!((arc.sweep() - TAU).abs() < 1e-9);
}

#[test]
fn spans_match_values_and_close_the_circle() {
    let set = SegmentSet::new(vec![
        Segment::new(0.125, RED),
        Segment::new(0.25, BLUE),
        Segment::new(0.1, RED),
    ]);
    let working = set.normalized(neutral());
    let sum: f64 = working.iter().map(|s| s.value).sum();
    assert!((sum - 1.0).abs() < 1e-9);

    let spans = arc_spans(&working, Rect::new(0.0, 0.0, 40.0, 40.0), 7.0);
    for span in &spans {
        assert!((span.arc.sweep() - working[span.index].value * TAU).abs() < 1e-9);
    }
    let swept: f64 = spans.iter().map(|s| s.arc.sweep()).sum();
    assert!((swept - TAU).abs() < 1e-9);
}

#[test]
fn center_label_truncates_percentages() {
    assert_eq!(center_label(0.5), "50%");
    assert_eq!(center_label(0.999), "99%");
}

#[test]
fn every_mutation_signals_the_host() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut ring = RingChart::new(Vec::new());
    let counter = Arc::clone(&hits);
    ring.on_data_changed(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    ring.replace_segments(vec![Segment::new(0.4, RED)]);
    ring.set_center_value(Some(0.4));
    ring.set_center_value(None);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn non_finite_samples_do_not_panic() {
    let mut chart = LineChart::new(4, true, Rgba::ACCENT);
    chart.append(f64::NAN);
    chart.append(f64::INFINITY);
    let ops = chart.draw_ops(Rect::new(0.0, 0.0, 40.0, 20.0));
    assert_eq!(ops.len(), 5);
}
