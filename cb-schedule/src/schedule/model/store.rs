use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Schedule;
use crate::schedule::ScheduleError;

/// timezone assigned to a service created during a merge. a structural
/// default, not inferred from the source document.
pub const DEFAULT_TZID: &str = "America/New_York";

/// the persisted schedules for one named service, e.g. "cbl" or "ctc".
/// `schedules` is kept sorted ascending by start date with at most one
/// entry per distinct start date.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServiceSchedules {
    /// IANA zone identifier, carried through unchanged
    pub tzid: String,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// the top-level persisted document mapping service names to their
/// schedules. read and written whole; the merge step is the only writer.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ScheduleStore {
    #[serde(default)]
    pub services: BTreeMap<String, ServiceSchedules>,
}

impl ScheduleStore {
    /// reads the store from a YAML file. a missing or empty file is an
    /// empty store so that a first ingestion can bootstrap it.
    pub fn load(path: &Path) -> Result<ScheduleStore, ScheduleError> {
        if !path.exists() {
            return Ok(ScheduleStore::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            ScheduleError::StoreIoError(format!("failure reading '{}': {e}", path.display()))
        })?;
        if contents.trim().is_empty() {
            return Ok(ScheduleStore::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| {
            ScheduleError::StoreIoError(format!("failure parsing '{}': {e}", path.display()))
        })
    }

    /// reads the store for schedule consumption (rendering), where a
    /// missing file is a user-visible error rather than an empty store.
    pub fn load_required(path: &Path) -> Result<ScheduleStore, ScheduleError> {
        if !path.exists() {
            return Err(ScheduleError::StoreIoError(format!(
                "schedule file not found: {}",
                path.display()
            )));
        }
        ScheduleStore::load(path)
    }

    /// writes the whole store document back to disk.
    pub fn save(&self, path: &Path) -> Result<(), ScheduleError> {
        let contents = serde_yaml::to_string(self).map_err(|e| {
            ScheduleError::StoreIoError(format!("failure serializing store: {e}"))
        })?;
        fs::write(path, contents).map_err(|e| {
            ScheduleError::StoreIoError(format!("failure writing '{}': {e}", path.display()))
        })
    }

    /// merges a newly built schedule into the named service, replacing
    /// any existing schedule with the same start date and keeping the
    /// collection sorted ascending by start date.
    pub fn merge(&mut self, service_name: &str, schedule: Schedule) {
        let service = self
            .services
            .entry(service_name.to_string())
            .or_insert_with(|| ServiceSchedules {
                tzid: String::from(DEFAULT_TZID),
                schedules: vec![],
            });
        service.schedules.retain(|s| s.start != schedule.start);
        service.schedules.push(schedule);
        service.schedules.sort_by_key(|s| s.start);
    }
}
