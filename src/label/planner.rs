//! # Layout Planner
//!
//! Computes the blank space between blocks so that the content fills the
//! label between its top and bottom margins.
//!
//! ```text
//! spacing = floor(((H - 2M - row_height * rows) / (blocks - 1)) * 8) / 8
//! ```
//!
//! The result is quantized down to the 1/8 mm feed step.

use crate::error::LabelError;
use crate::protocol::commands::STEPS_PER_MM;

/// Inputs to the spacing computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlanner {
    pub height_mm: f64,
    pub margin_mm: f64,
    pub row_height_mm: f64,
}

impl LayoutPlanner {
    pub fn new(height_mm: f64, margin_mm: f64, row_height_mm: f64) -> Self {
        Self {
            height_mm,
            margin_mm,
            row_height_mm,
        }
    }

    /// Space fed between consecutive blocks.
    ///
    /// Returns 0 for a single block (nothing to space). Fails with
    /// [`LabelError::LayoutOverflow`] when the rows and margins alone are
    /// taller than the label.
    ///
    /// ```
    /// use osilabel::label::planner::LayoutPlanner;
    ///
    /// let planner = LayoutPlanner::new(50.0, 4.0, 6.0);
    /// assert_eq!(planner.spacing(5, 3).unwrap(), 6.0);
    /// assert_eq!(planner.spacing(5, 5).unwrap(), 3.0);
    /// ```
    pub fn spacing(&self, rows: usize, blocks: usize) -> Result<f64, LabelError> {
        let content_mm = 2.0 * self.margin_mm + self.row_height_mm * rows as f64;
        let free_mm = self.height_mm - content_mm;

        if free_mm < 0.0 {
            return Err(LabelError::LayoutOverflow {
                height_mm: self.height_mm,
                content_mm,
            });
        }
        if blocks <= 1 {
            return Ok(0.0);
        }

        let raw = free_mm / (blocks - 1) as f64;
        Ok((raw * STEPS_PER_MM).floor() / STEPS_PER_MM)
    }
}
