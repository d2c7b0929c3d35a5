pub mod app;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod render;
mod schedule_error;

pub use schedule_error::ScheduleError;
