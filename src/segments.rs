use crate::geometry::Rgba;

/// A slice of the ring: `value` is its fraction of the whole circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub value: f64,
    pub color: Rgba,
}

impl Segment {
    pub const fn new(value: f64, color: Rgba) -> Self {
        Self { value, color }
    }
}

/// Ordered ring segments plus an optional center value.
///
/// Nothing is validated here; sums below one are padded when drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentSet {
    segments: Vec<Segment>,
    center_value: Option<f64>,
}

impl SegmentSet {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            center_value: None,
        }
    }

    pub fn replace(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }

    pub fn set_center_value(&mut self, value: Option<f64>) {
        self.center_value = value;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn center_value(&self) -> Option<f64> {
        self.center_value
    }

    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }

    /// Working copy that always closes the circle when the total falls short.
    pub fn normalized(&self, remainder_color: Rgba) -> Vec<Segment> {
        let total = self.total();
        let mut working = self.segments.clone();
        if total < 1.0 {
            working.push(Segment::new(1.0 - total, remainder_color));
        }
        working
    }
}
