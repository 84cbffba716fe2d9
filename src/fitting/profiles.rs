use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{BodyProfile, MeasurementSet};

/// A named, explicitly saved measurement set. Transient form state never
/// reaches the repository; only a save action does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementProfile {
    pub name: String,
    pub measurements: MeasurementSet,
    #[serde(default)]
    pub body: BodyProfile,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction so the fitting service can be exercised in isolation.
pub trait ProfileRepository: Send + Sync {
    fn upsert(&self, profile: MeasurementProfile) -> Result<(), ProfileStoreError>;
    fn fetch(&self, name: &str) -> Result<Option<MeasurementProfile>, ProfileStoreError>;
    fn list(&self) -> Result<Vec<MeasurementProfile>, ProfileStoreError>;
    fn remove(&self, name: &str) -> Result<bool, ProfileStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store backing the default server wiring and the tests.
#[derive(Default, Clone)]
pub struct MemoryProfileRepository {
    profiles: Arc<Mutex<BTreeMap<String, MeasurementProfile>>>,
}

impl MemoryProfileRepository {
    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, MeasurementProfile>>, ProfileStoreError>
    {
        self.profiles
            .lock()
            .map_err(|_| ProfileStoreError::Unavailable("profile store poisoned".to_string()))
    }
}

impl ProfileRepository for MemoryProfileRepository {
    fn upsert(&self, profile: MeasurementProfile) -> Result<(), ProfileStoreError> {
        self.guard()?.insert(profile.name.clone(), profile);
        Ok(())
    }

    fn fetch(&self, name: &str) -> Result<Option<MeasurementProfile>, ProfileStoreError> {
        Ok(self.guard()?.get(name).cloned())
    }

    fn list(&self) -> Result<Vec<MeasurementProfile>, ProfileStoreError> {
        Ok(self.guard()?.values().cloned().collect())
    }

    fn remove(&self, name: &str) -> Result<bool, ProfileStoreError> {
        Ok(self.guard()?.remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> MeasurementProfile {
        MeasurementProfile {
            name: name.to_string(),
            measurements: MeasurementSet {
                bust: Some(92.0),
                ..MeasurementSet::default()
            },
            body: BodyProfile::default(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_fetch_list_remove_round_trip() {
        let repository = MemoryProfileRepository::default();
        repository.upsert(profile("ceremony")).expect("upsert");
        repository.upsert(profile("reception")).expect("upsert");

        let fetched = repository.fetch("ceremony").expect("fetch");
        assert_eq!(fetched.map(|p| p.name), Some("ceremony".to_string()));

        let listed = repository.list().expect("list");
        assert_eq!(listed.len(), 2);

        assert!(repository.remove("ceremony").expect("remove"));
        assert!(!repository.remove("ceremony").expect("second remove"));
        assert!(repository.fetch("ceremony").expect("fetch").is_none());
    }

    #[test]
    fn upsert_replaces_existing_profile() {
        let repository = MemoryProfileRepository::default();
        repository.upsert(profile("ceremony")).expect("upsert");

        let mut updated = profile("ceremony");
        updated.measurements.waist = Some(70.0);
        repository.upsert(updated).expect("upsert again");

        let fetched = repository
            .fetch("ceremony")
            .expect("fetch")
            .expect("profile present");
        assert_eq!(fetched.measurements.waist, Some(70.0));
        assert_eq!(repository.list().expect("list").len(), 1);
    }
}
