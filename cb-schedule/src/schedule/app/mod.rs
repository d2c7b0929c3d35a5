mod operation;
mod schedule_app;

pub use operation::ScheduleOperation;
pub use schedule_app::ScheduleApp;
