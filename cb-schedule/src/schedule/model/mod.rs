mod ferry_leg;
mod schedule;
mod store;
mod time_of_day;
mod weekday;

pub use ferry_leg::FerryLeg;
pub use schedule::Schedule;
pub use store::{ScheduleStore, ServiceSchedules, DEFAULT_TZID};
pub use time_of_day::TimeOfDay;
pub use weekday::Weekday;
