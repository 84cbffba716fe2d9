//! Measurement intake: the fit-confidence estimator, the declarative
//! validation rule table, and saved measurement profiles.

pub mod confidence;
pub mod domain;
pub mod profiles;
pub mod router;
pub mod service;
pub mod validation;

pub use confidence::{estimate, FitConfidence, FitLevel};
pub use domain::{BodyProfile, BraCup, MeasurementField, MeasurementSet};
pub use profiles::{MeasurementProfile, MemoryProfileRepository, ProfileRepository, ProfileStoreError};
pub use router::fitting_router;
pub use service::{FittingService, FittingServiceError};
pub use validation::{FieldRule, MeasurementRules, ValidationIssue, ValidationProblem};
