use super::ScheduleOperation;
use clap::Parser;

/// command line tool for ingesting, normalizing and publishing
/// Chebeague Island ferry schedules
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ScheduleApp {
    #[command(subcommand)]
    pub op: ScheduleOperation,
}
