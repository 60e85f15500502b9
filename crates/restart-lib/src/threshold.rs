//! Minimum restart threshold for pod-aggregate reports

use crate::error::ReportError;

/// Noise-reduction knob for large clusters.
///
/// Zero admits every pod that restarted at all. A positive value admits
/// only pods with strictly more restarts than the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Threshold(i32);

impl Threshold {
    pub fn new(minimum: i32) -> Result<Self, ReportError> {
        if minimum < 0 {
            return Err(ReportError::NegativeThreshold(minimum));
        }
        Ok(Self(minimum))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 > 0
    }

    /// Whether a pod with `total_restarts` qualifies for the report
    pub fn admits(&self, total_restarts: i32) -> bool {
        if total_restarts <= 0 {
            return false;
        }
        if self.is_set() {
            total_restarts > self.0
        } else {
            true
        }
    }
}
