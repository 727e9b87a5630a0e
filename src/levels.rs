use std::collections::VecDeque;
use std::sync::Mutex;

use crate::geometry::Rgba;
use crate::segments::Segment;

pub const QUIET_CEILING: f64 = 0.05;
pub const LOUD_FLOOR: f64 = 0.3;

pub const QUIET_COLOR: Rgba = Rgba::rgb(0.204, 0.78, 0.349);
pub const MODERATE_COLOR: Rgba = Rgba::rgb(1.0, 0.8, 0.0);
pub const LOUD_COLOR: Rgba = Rgba::rgb(1.0, 0.231, 0.188);

/// Block levels handed from the audio thread to the UI thread.
///
/// Bounded: if the UI falls behind, the oldest pending levels are dropped.
pub struct LevelTap {
    pending: VecDeque<f64>,
    capacity: usize,
}

impl LevelTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, level: f64) {
        if self.pending.len() == self.capacity {
            self.pending.pop_front();
        }
        self.pending.push_back(level);
    }

    pub fn drain(&mut self) -> Vec<f64> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Takes every pending level, recovering the tap if an audio callback panicked
/// while holding it.
pub fn drain_tap(tap: &Mutex<LevelTap>) -> Vec<f64> {
    match tap.lock() {
        Ok(mut pending) => pending.drain(),
        Err(poisoned) => {
            log::warn!("level tap poisoned by a panicked audio callback, recovering");
            tap.clear_poison();
            poisoned.into_inner().drain()
        }
    }
}

/// Root mean square of one block, in `0.0..=1.0` for normalized audio.
pub fn block_rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt().min(1.0)
}

/// Share of `values` falling in the quiet, moderate and loud bands.
///
/// Non-finite values are not counted, so the shares may sum to less than one.
pub fn level_bands(values: &[f64]) -> Vec<Segment> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut counts = [0usize; 3];
    for value in values.iter().filter(|v| v.is_finite()) {
        let band = if *value < QUIET_CEILING {
            0
        } else if *value < LOUD_FLOOR {
            1
        } else {
            2
        };
        counts[band] += 1;
    }
    let total = values.len() as f64;
    [QUIET_COLOR, MODERATE_COLOR, LOUD_COLOR]
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(color, count)| Segment::new(count as f64 / total, color))
        .collect()
}
