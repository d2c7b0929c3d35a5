use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FerryLeg;

/// one named, dated timetable for one service. immutable once built;
/// a later ingestion with the same `start` supersedes it in the store
/// rather than mutating it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Schedule {
    /// human label for the timetable, e.g. "Summer" or "Fall"
    pub name: String,
    /// first date the timetable is in effect
    pub start: NaiveDate,
    /// last date the timetable is in effect; open-ended when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    /// provenance of the source document
    pub url: String,
    /// legs in parse order
    #[serde(default)]
    pub ferries: Vec<FerryLeg>,
}

impl Schedule {
    /// true when this timetable covers the given date. an absent end
    /// date means the schedule is open-ended.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.map_or(true, |end| date <= end)
    }
}
