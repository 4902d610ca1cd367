//! GPA Aggregator - credit-weighted grade point average.

use serde::Serialize;

use super::graded_course::CreditWeighted;

/// Result of aggregating a set of graded items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaSummary {
    /// Unrounded weighted average.
    pub gpa: f64,
    pub total_credits: u32,
}

impl GpaSummary {
    pub const EMPTY: Self = Self {
        gpa: 0.0,
        total_credits: 0,
    };

    /// GPA rounded to two decimal places, for stored summary values.
    pub fn rounded_gpa(&self) -> f64 {
        (self.gpa * 100.0).round() / 100.0
    }

    /// GPA formatted for display.
    pub fn display_gpa(&self) -> String {
        format!("{:.2}", self.gpa)
    }
}

/// Stateless GPA computation.
pub struct GpaCalculator;

impl GpaCalculator {
    /// Computes the weighted GPA and total credits.
    ///
    /// # Edge Cases
    /// - Empty input: `{ gpa: 0, total_credits: 0 }`
    pub fn aggregate<T: CreditWeighted>(items: &[T]) -> GpaSummary {
        let (weighted_points, total_credits) =
            items.iter().fold((0.0_f64, 0_u32), |(points, credits), item| {
                let hours = item.credit_hours();
                (
                    points + item.grade_points() * f64::from(hours),
                    credits + hours,
                )
            });

        if total_credits == 0 {
            return GpaSummary::EMPTY;
        }

        GpaSummary {
            gpa: weighted_points / f64::from(total_credits),
            total_credits,
        }
    }
}
