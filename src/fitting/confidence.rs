use super::domain::{BodyProfile, MeasurementField, MeasurementSet};
use serde::{Deserialize, Serialize};

/// Qualitative tier shown next to the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitLevel {
    Low,
    Medium,
    High,
}

impl FitLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub const fn for_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::High
        } else if percentage >= 60 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Heuristic completeness score shown as guidance on the measurement form.
/// Derived on every change, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitConfidence {
    pub percentage: u8,
    pub level: FitLevel,
}

const MEASUREMENT_WEIGHT: f32 = 70.0;
const BUILD_BONUS: f32 = 20.0;
const CUP_BONUS: f32 = 10.0;

/// Score how complete the client's measurement input is.
///
/// The seven measurement fields carry 70 points between them; height plus
/// weight on the body profile add 20 more, a bra cup the last 10. Total
/// functions over their inputs: missing or non-positive fields are treated
/// as absent, never rejected.
pub fn estimate(measurements: &MeasurementSet, body: &BodyProfile) -> FitConfidence {
    let field_count = MeasurementField::ordered().len() as f32;
    let provided = measurements.provided_count() as f32;

    let mut score = (provided / field_count) * MEASUREMENT_WEIGHT;
    if body.has_build_measurements() {
        score += BUILD_BONUS;
    }
    if body.bra_cup.is_some() {
        score += CUP_BONUS;
    }

    let percentage = score.min(100.0).round() as u8;

    FitConfidence {
        percentage,
        level: FitLevel::for_percentage(percentage),
    }
}
