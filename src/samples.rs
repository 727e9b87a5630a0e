use crate::error::ChartError;

/// Fixed-length scrolling window of the most recent samples.
///
/// The length is set at construction and never changes: appending drops the
/// oldest value. A fresh buffer is zero-filled.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    values: Vec<f64>,
}

impl SampleBuffer {
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(buffer) => buffer,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ChartError> {
        if capacity == 0 {
            return Err(ChartError::ZeroCapacity);
        }
        Ok(Self {
            values: vec![0.0; capacity],
        })
    }

    /// Scrolls the window by one. Values are stored as given, NaN included.
    pub fn append(&mut self, value: f64) {
        self.values.rotate_left(1);
        if let Some(last) = self.values.last_mut() {
            *last = value;
        }
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = f64>) {
        for value in values {
            self.append(value);
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zero_filled() {
        let buffer = SampleBuffer::new(4);
        assert_eq!(buffer.values(), &[0.0; 4]);
        assert_eq!(buffer.latest(), Some(0.0));
        assert!(!buffer.is_empty());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(SampleBuffer::try_new(0), Err(ChartError::ZeroCapacity));
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn zero_capacity_panics_on_new() {
        let _ = SampleBuffer::new(0);
    }

    #[test]
    fn append_scrolls_instead_of_growing() {
        let mut buffer = SampleBuffer::new(3);
        for (k, value) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
            buffer.append(value);
            assert_eq!(buffer.len(), 3, "after {} appends", k + 1);
        }
        assert_eq!(buffer.values(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn partial_fill_keeps_leading_zeros() {
        let mut buffer = SampleBuffer::new(4);
        buffer.extend([0.25, 0.75]);
        assert_eq!(buffer.values(), &[0.0, 0.0, 0.25, 0.75]);
    }

    #[test]
    fn single_slot_buffer_holds_latest() {
        let mut buffer = SampleBuffer::new(1);
        buffer.append(0.4);
        buffer.append(0.6);
        assert_eq!(buffer.values(), &[0.6]);
    }

    #[test]
    fn non_finite_values_are_kept() {
        let mut buffer = SampleBuffer::new(2);
        buffer.append(f64::NAN);
        buffer.append(f64::INFINITY);
        assert!(buffer.values()[0].is_nan());
        assert_eq!(buffer.latest(), Some(f64::INFINITY));
    }
}
