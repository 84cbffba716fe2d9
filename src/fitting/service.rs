use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::{estimate, FitConfidence};
use super::domain::{BodyProfile, MeasurementSet};
use super::profiles::{MeasurementProfile, ProfileRepository, ProfileStoreError};
use super::validation::{summarize, MeasurementRules, ValidationIssue};

/// Service composing the rule table, the estimator, and the profile store.
pub struct FittingService<P> {
    profiles: Arc<P>,
    rules: MeasurementRules,
}

/// Payload for saving a profile; the service stamps `updated_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSaveRequest {
    pub name: String,
    #[serde(default)]
    pub measurements: MeasurementSet,
    #[serde(default)]
    pub body: BodyProfile,
}

/// Estimate plus any form feedback, returned by the preview endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FitPreview {
    pub confidence: FitConfidence,
    pub issues: Vec<ValidationIssue>,
}

impl<P> FittingService<P>
where
    P: ProfileRepository + 'static,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self {
            profiles,
            rules: MeasurementRules::standard(),
        }
    }

    /// Guidance only: issues ride along with the estimate, nothing is gated.
    pub fn preview(&self, measurements: &MeasurementSet, body: &BodyProfile) -> FitPreview {
        FitPreview {
            confidence: estimate(measurements, body),
            issues: self.rules.validate(measurements),
        }
    }

    /// Persist a named profile. Partial forms are fine; out-of-range values
    /// are not.
    pub fn save_profile(
        &self,
        request: ProfileSaveRequest,
        now: DateTime<Utc>,
    ) -> Result<MeasurementProfile, FittingServiceError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(FittingServiceError::UnnamedProfile);
        }

        let issues = self.rules.range_issues(&request.measurements);
        if !issues.is_empty() {
            return Err(FittingServiceError::OutOfRange { issues });
        }

        let profile = MeasurementProfile {
            name,
            measurements: request.measurements,
            body: request.body,
            updated_at: now,
        };
        self.profiles.upsert(profile.clone())?;
        Ok(profile)
    }

    pub fn profile(&self, name: &str) -> Result<MeasurementProfile, FittingServiceError> {
        self.profiles
            .fetch(name)?
            .ok_or_else(|| FittingServiceError::ProfileNotFound(name.to_string()))
    }

    pub fn profiles(&self) -> Result<Vec<MeasurementProfile>, FittingServiceError> {
        Ok(self.profiles.list()?)
    }

    pub fn remove_profile(&self, name: &str) -> Result<(), FittingServiceError> {
        if self.profiles.remove(name)? {
            Ok(())
        } else {
            Err(FittingServiceError::ProfileNotFound(name.to_string()))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FittingServiceError {
    #[error("measurement validation failed: {}", summarize(.issues))]
    OutOfRange { issues: Vec<ValidationIssue> },
    #[error("profile name must not be empty")]
    UnnamedProfile,
    #[error("no measurement profile named '{0}'")]
    ProfileNotFound(String),
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}
