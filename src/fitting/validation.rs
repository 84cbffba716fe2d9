use super::domain::{MeasurementField, MeasurementSet};
use serde::Serialize;

/// Per-field validation rule. The table below is the single source of the
/// accepted measurement ranges; no schema library involved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRule {
    pub min: f32,
    pub max: f32,
    pub required: bool,
}

/// Declarative rule table consumed by [`MeasurementRules::validate`].
#[derive(Debug, Clone)]
pub struct MeasurementRules {
    rules: Vec<(MeasurementField, FieldRule)>,
}

impl MeasurementRules {
    /// Ranges the atelier accepts without a manual review, in centimeters.
    /// Bust, waist, hips, and height anchor the pattern draft and are
    /// required; the rest may arrive at the first fitting.
    pub fn standard() -> Self {
        let rule = |min, max, required| FieldRule { min, max, required };
        Self {
            rules: vec![
                (MeasurementField::Bust, rule(60.0, 140.0, true)),
                (MeasurementField::Underbust, rule(50.0, 130.0, false)),
                (MeasurementField::Waist, rule(45.0, 130.0, true)),
                (MeasurementField::Hips, rule(60.0, 150.0, true)),
                (MeasurementField::HollowToFloor, rule(100.0, 200.0, false)),
                (MeasurementField::Height, rule(130.0, 210.0, true)),
                (MeasurementField::PreferredHeel, rule(0.0, 15.0, false)),
            ],
        }
    }

    /// Check every provided value against its range and report missing
    /// required fields. Returns an empty list when the set is acceptable.
    pub fn validate(&self, measurements: &MeasurementSet) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (field, rule) in &self.rules {
            match measurements.value(*field) {
                Some(value) if value < rule.min => issues.push(ValidationIssue {
                    field: *field,
                    problem: ValidationProblem::BelowMinimum { min: rule.min },
                }),
                Some(value) if value > rule.max => issues.push(ValidationIssue {
                    field: *field,
                    problem: ValidationProblem::AboveMaximum { max: rule.max },
                }),
                Some(_) => {}
                None if rule.required => issues.push(ValidationIssue {
                    field: *field,
                    problem: ValidationProblem::Missing,
                }),
                None => {}
            }
        }

        issues
    }

    /// Range violations only, ignoring missing fields. Used where a partial
    /// form is acceptable but bad numbers are not.
    pub fn range_issues(&self, measurements: &MeasurementSet) -> Vec<ValidationIssue> {
        self.validate(measurements)
            .into_iter()
            .filter(|issue| issue.problem != ValidationProblem::Missing)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: MeasurementField,
    pub problem: ValidationProblem,
}

impl ValidationIssue {
    pub fn summary(&self) -> String {
        match self.problem {
            ValidationProblem::Missing => format!("{} is required", self.field.label()),
            ValidationProblem::BelowMinimum { min } => {
                format!("{} must be at least {min} cm", self.field.label())
            }
            ValidationProblem::AboveMaximum { max } => {
                format!("{} must be at most {max} cm", self.field.label())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValidationProblem {
    Missing,
    BelowMinimum { min: f32 },
    AboveMaximum { max: f32 },
}

pub fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ValidationIssue::summary)
        .collect::<Vec<_>>()
        .join("; ")
}
