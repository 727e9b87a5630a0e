//! Real-time chart rendering core: a scrolling line chart and a segmented
//! ring gauge, both emitting vector draw calls against an abstract surface.

pub mod audio;
pub mod egui_surface;
pub mod error;
pub mod geometry;
pub mod levels;
pub mod line_chart;
pub mod notify;
pub mod ring_chart;
pub mod samples;
pub mod segments;
pub mod settings;
pub mod surface;

pub use error::ChartError;
pub use geometry::{Path, PathEl, Point, Rect, Rgba};
pub use line_chart::{LineChart, LineStyle};
pub use ring_chart::{RingChart, RingStyle};
pub use samples::SampleBuffer;
pub use segments::{Segment, SegmentSet};
pub use surface::{DrawOp, DrawOps, RecordingSurface, Surface, TextMetrics};
