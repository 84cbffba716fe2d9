use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ProductionStep, TimelineStep};

/// Ordered list of production milestones for one order.
///
/// The only mutation path during normal operation is [`toggle_step`], which
/// keeps the displayed timeline consistent: an earlier step is never shown
/// incomplete underneath a completed later one. Administrative overwrites go
/// through [`ProductionTimeline::from_steps`] and accept whatever the caller
/// sends, matching the looseness of the stored data.
///
/// [`toggle_step`]: ProductionTimeline::toggle_step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductionTimeline {
    steps: Vec<TimelineStep>,
}

impl ProductionTimeline {
    /// Instantiate the standard timeline from the canonical step catalog.
    pub fn standard() -> Self {
        Self {
            steps: ProductionStep::ordered()
                .iter()
                .copied()
                .map(TimelineStep::pending)
                .collect(),
        }
    }

    pub fn from_steps(steps: Vec<TimelineStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    /// Flip the step with the given label, cascading for consistency.
    ///
    /// Completing a step marks every earlier step complete as well,
    /// stamping `now` only where no timestamp exists yet. Un-completing a
    /// step clears it and every later step. An unknown label is a no-op:
    /// stale labels arrive from concurrent edits and a cosmetic progress
    /// view is not the place to fail on them.
    ///
    /// Returns a new timeline; the receiver is left untouched so callers can
    /// detect change by comparing the two.
    pub fn toggle_step(&self, target_label: &str, now: DateTime<Utc>) -> Self {
        let Some(target_index) = self.steps.iter().position(|step| step.label == target_label)
        else {
            return self.clone();
        };
        let should_complete = !self.steps[target_index].completed;

        let steps = self
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let mut step = step.clone();
                if index < target_index {
                    if should_complete {
                        step.completed = true;
                        step.completed_at = step.completed_at.or(Some(now));
                    }
                } else if index == target_index {
                    step.completed = should_complete;
                    step.completed_at = if should_complete {
                        step.completed_at.or(Some(now))
                    } else {
                        None
                    };
                } else if !should_complete {
                    step.completed = false;
                    step.completed_at = None;
                }
                step
            })
            .collect();

        Self { steps }
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|step| step.completed)
    }

    pub fn progress_percentage(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }

        let ratio = self.completed_count() as f32 / self.steps.len() as f32;
        (ratio * 100.0).round() as u8
    }

    /// Label of the first incomplete step, or the last step once everything
    /// is done. Drives the display `stage` on order records.
    pub fn current_stage(&self) -> &str {
        self.steps
            .iter()
            .find(|step| !step.completed)
            .or_else(|| self.steps.last())
            .map(|step| step.label.as_str())
            .unwrap_or_default()
    }

    /// Mark a step complete at a known time, used when hydrating from a
    /// worksheet export. Already-completed steps keep their original
    /// timestamp. Returns whether the label matched a pending step.
    pub(crate) fn record_completion(&mut self, label: &str, completed_at: DateTime<Utc>) -> bool {
        match self.steps.iter_mut().find(|step| step.label == label) {
            Some(step) if !step.completed => {
                step.completed = true;
                step.completed_at = Some(completed_at);
                true
            }
            _ => false,
        }
    }
}
