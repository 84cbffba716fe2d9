//! Import production progress from an atelier worksheet CSV export.
//!
//! The floor team keeps a per-order worksheet with one row per milestone;
//! this module hydrates a [`ProductionTimeline`] from that export. Step
//! names are matched against the canonical catalog after normalization, so
//! spreadsheet quirks (BOM, stray whitespace, casing) do not lose data.
//! Unknown step names and duplicate rows are skipped.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::production::domain::ProductionStep;
use crate::production::timeline::ProductionTimeline;

pub use parser::normalize_label;

#[derive(Debug, thiserror::Error)]
pub enum WorksheetImportError {
    #[error("failed to read worksheet export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid worksheet CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct WorksheetImporter;

impl WorksheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ProductionTimeline, WorksheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ProductionTimeline, WorksheetImportError> {
        let mut timeline = ProductionTimeline::standard();
        let mut applied: HashSet<&'static str> = HashSet::new();

        for record in parser::parse_records(reader)? {
            let Some(label) = canonical_label(&record.normalized_label) else {
                continue;
            };
            if applied.contains(label) {
                continue;
            }

            if let Some(completed_at) = record.completed_at {
                if timeline.record_completion(label, completed_at) {
                    applied.insert(label);
                }
            }
        }

        Ok(timeline)
    }
}

fn canonical_label(normalized: &str) -> Option<&'static str> {
    ProductionStep::ordered()
        .iter()
        .map(|step| step.label())
        .find(|label| normalize_label(label) == normalized)
}
