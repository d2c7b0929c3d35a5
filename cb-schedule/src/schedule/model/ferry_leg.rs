use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{TimeOfDay, Weekday};

/// one scheduled one-way trip. `byday` is the set of weekdays the trip
/// operates; set semantics, serialized in calendar order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FerryLeg {
    /// canonical 24-hour departure time
    pub time: TimeOfDay,
    /// departure location name
    pub from: String,
    /// arrival location name
    pub to: String,
    /// weekdays this leg operates
    pub byday: BTreeSet<Weekday>,
}

impl FerryLeg {
    pub fn new(
        time: TimeOfDay,
        from: &str,
        to: &str,
        byday: BTreeSet<Weekday>,
    ) -> FerryLeg {
        FerryLeg {
            time,
            from: from.to_string(),
            to: to.to_string(),
            byday,
        }
    }

    pub fn operates_on(&self, day: Weekday) -> bool {
        self.byday.contains(&day)
    }
}
