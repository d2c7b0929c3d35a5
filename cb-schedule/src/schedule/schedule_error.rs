use chrono::NaiveDate;

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("No table found in source document")]
    NoTableFound,
    #[error("Expected exactly one table in source document, found {0}")]
    MultipleTablesFound(usize),
    #[error("No data rows found in source table")]
    EmptyTable,
    #[error("Could not find an 'Effective:' label in source document")]
    EffectiveLabelNotFound,
    #[error("Could not parse date range: {0}")]
    DateRangeUnparseable(String),
    #[error("Invalid year in date '{raw}' -> {parsed} and no reference date available for correction")]
    UnresolvableYear { raw: String, parsed: NaiveDate },
    #[error("Corrected end date {end} is before start date {start}")]
    DateOrderingViolation { end: NaiveDate, start: NaiveDate },
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
    #[error("Failed to parse service availability: '{0}'")]
    UnparseableAvailability(String),
    #[error("Failed to build document selector: {0}")]
    InvalidSelector(String),
    #[error("Failed fetching source document: {0}")]
    FetchError(String),
    #[error("Failure reading or writing schedule store: {0}")]
    StoreIoError(String),
    #[error("Failure reading or writing table csv: {0}")]
    CsvError(String),
    #[error("Failure rendering site output: {0}")]
    RenderError(String),
}
