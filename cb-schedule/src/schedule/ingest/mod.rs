pub mod fetch;
mod report;
mod row_grid;
mod row_pair;

pub use report::{IngestReport, RowOutcome};
pub use row_grid::{build_grid_schedule, export_normalized_grid, read_grid};
pub use row_pair::{parse_html_schedule, schedule_name_from_url};
