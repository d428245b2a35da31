use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// One row of a grading table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDescriptor {
    /// Lowest score (inclusive) that earns this grade.
    #[serde(rename = "minimumScore")]
    pub min_score: u32,
    pub tier: String,
    pub label: String,
    /// Display colour, `#RRGGBB`.
    pub color: String,
}

impl GradeDescriptor {
    pub fn new(min_score: u32, tier: &str, label: &str, color: &str) -> Self {
        Self {
            min_score,
            tier: tier.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradingPolicyError {
    #[error("grading table is empty")]
    Empty,
    #[error("grading thresholds must strictly decrease: {previous} is followed by {next}")]
    NotDescending { previous: u32, next: u32 },
}

/// Maps a score to a grade using a table of descending thresholds.
///
/// The last row should have a threshold of 0 so every score matches
/// something. A table without that catch-all is accepted, and scores
/// below its lowest threshold get the last row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingPolicy {
    descriptors: Vec<GradeDescriptor>,
}

impl GradingPolicy {
    pub fn new(descriptors: Vec<GradeDescriptor>) -> Result<Self, GradingPolicyError> {
        if descriptors.is_empty() {
            return Err(GradingPolicyError::Empty);
        }

        for pair in descriptors.windows(2) {
            if pair[1].min_score >= pair[0].min_score {
                return Err(GradingPolicyError::NotDescending {
                    previous: pair[0].min_score,
                    next: pair[1].min_score,
                });
            }
        }

        if let Some(last) = descriptors.last().filter(|last| last.min_score != 0) {
            warn!(
                lowest = last.min_score,
                tier = %last.tier,
                "grading table has no catch-all at 0; lower scores fall back to the last grade"
            );
        }

        Ok(Self { descriptors })
    }

    pub fn descriptors(&self) -> &[GradeDescriptor] {
        &self.descriptors
    }

    /// First grade, highest threshold first, whose threshold the score reaches.
    pub fn resolve(&self, score: u32) -> &GradeDescriptor {
        self.descriptors
            .iter()
            .find(|descriptor| score >= descriptor.min_score)
            .unwrap_or_else(|| self.lowest())
    }

    fn lowest(&self) -> &GradeDescriptor {
        // `new` refuses empty tables.
        &self.descriptors[self.descriptors.len() - 1]
    }
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            descriptors: vec![
                GradeDescriptor::new(90, "S", "Perfect!", "#FFD700"),
                GradeDescriptor::new(70, "A", "Excellent!", "#4CAF50"),
                GradeDescriptor::new(50, "B", "Good job!", "#2196F3"),
                GradeDescriptor::new(30, "C", "Keep trying!", "#FF9800"),
                GradeDescriptor::new(0, "D", "Try again!", "#F44336"),
            ],
        }
    }
}
