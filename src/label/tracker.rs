//! # Feed Position Tracker
//!
//! Keeps the print head position for the current job, in mm from the
//! midpoint of the gap behind the label. The tracker never talks to the
//! device. It adds up the distance each displacing operation *requested*:
//! printed rows and explicit feeds.

/// Running head position for one job.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeedPositionTracker {
    position_mm: f64,
}

impl FeedPositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current head position in mm.
    pub fn position(&self) -> f64 {
        self.position_mm
    }

    /// Set an absolute position. Used once after the alignment feed.
    pub fn reset_to(&mut self, position_mm: f64) {
        self.position_mm = position_mm;
    }

    /// Apply a signed displacement (as returned by the encoder's feeds).
    pub fn advance(&mut self, delta_mm: f64) -> f64 {
        self.position_mm += delta_mm;
        self.position_mm
    }

    /// Account for `rows` printed rows of `row_height_mm` each.
    pub fn advance_rows(&mut self, rows: usize, row_height_mm: f64) -> f64 {
        self.advance(rows as f64 * row_height_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(FeedPositionTracker::new().position(), 0.0);
    }

    #[test]
    fn test_reset_and_advance() {
        let mut tracker = FeedPositionTracker::new();
        tracker.reset_to(6.5);
        tracker.advance_rows(2, 6.0);
        assert_eq!(tracker.position(), 18.5);
        assert_eq!(tracker.advance(-0.5), 18.0);
    }

    #[test]
    fn test_sums_requested_not_rounded() {
        let mut tracker = FeedPositionTracker::new();
        // 0.06mm rounds to 0 steps on the device but is still tracked
        tracker.advance(0.06);
        tracker.advance(0.06);
        assert!((tracker.position() - 0.12).abs() < 1e-12);
    }
}
