//! this tool ingests Chebeague Island ferry timetables from their source
//! documents, normalizes them into a single YAML schedule store, and
//! publishes the store as a static multi-day website.
use cb_schedule::schedule::app::ScheduleApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = ScheduleApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
