use std::fmt::Display;

/// the fate of one source table row during ingestion. rows either
/// contribute legs to the schedule or are skipped with a reason; the
/// distinction is a value, not control flow, so callers and tests can
/// inspect it after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Built { row: usize, legs: usize },
    Skipped { row: usize, reason: String },
}

/// per-row outcomes accumulated over one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub outcomes: Vec<RowOutcome>,
}

impl IngestReport {
    pub fn record(&mut self, outcome: RowOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn built_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Built { .. }))
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Skipped { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

impl Display for IngestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows ingested, {} rows skipped",
            self.built_count(),
            self.skipped_count()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{IngestReport, RowOutcome};

    #[test]
    fn test_report_counts_and_display() {
        let mut report = IngestReport::default();
        report.record(RowOutcome::Built { row: 1, legs: 2 });
        report.record(RowOutcome::Skipped {
            row: 2,
            reason: String::from("Invalid time format: X"),
        });
        report.record(RowOutcome::Built { row: 3, legs: 2 });
        assert_eq!(report.built_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.to_string(), "2 rows ingested, 1 rows skipped");
    }
}
