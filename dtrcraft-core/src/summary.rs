//! Summary counts over a set of record reports

use crate::detector::RecordReport;
use crate::problem::{ProblemType, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals shown alongside a detection run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub total_records: usize,
    pub problem_records: usize,
    pub clean_records: usize,
    /// Problems per type, counted once per record that has them
    pub by_type: BTreeMap<ProblemType, usize>,
    /// Records per aggregate severity
    pub by_severity: BTreeMap<Severity, usize>,
}

impl DetectionSummary {
    pub fn from_reports(reports: &[RecordReport]) -> Self {
        let mut summary = DetectionSummary {
            total_records: reports.len(),
            ..Default::default()
        };

        for report in reports {
            let Some(severity) = report.severity else {
                continue;
            };
            summary.problem_records += 1;
            *summary.by_severity.entry(severity).or_default() += 1;

            for problem in &report.problems {
                *summary.by_type.entry(problem.problem_type).or_default() += 1;
            }
        }

        summary.clean_records = summary.total_records - summary.problem_records;
        summary
    }

    pub fn count(&self, problem_type: ProblemType) -> usize {
        self.by_type.get(&problem_type).copied().unwrap_or(0)
    }

    pub fn has_problems(&self) -> bool {
        self.problem_records > 0
    }
}
