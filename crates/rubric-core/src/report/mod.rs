pub mod console;

use serde::{Deserialize, Serialize};

/// One (case, metric) entry of the result table. The rationale is the full
/// judge response (or the failure description) and is kept verbatim: the
/// crude score heuristic makes qualitative review of it necessary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub case_index: usize,
    pub input: String,
    pub metric: String,
    pub score: f64,
    pub passed: bool,
    pub reason: String,
    pub duration_ms: Option<u64>,
}

/// Per-metric pass count over the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: String,
    pub passed: usize,
    pub total: usize,
}

/// Aggregate output of one harness run. Serializable as-is for
/// structured-log rendering; `console::print_summary` renders it for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub total_cases: usize,
    pub rows: Vec<ResultRow>,
}

impl Report {
    /// Pass counts per metric, in first-seen row order.
    pub fn metric_summaries(&self) -> Vec<MetricSummary> {
        let mut summaries: Vec<MetricSummary> = Vec::new();
        for row in &self.rows {
            match summaries.iter_mut().find(|s| s.metric == row.metric) {
                Some(s) => {
                    s.total += 1;
                    s.passed += usize::from(row.passed);
                }
                None => summaries.push(MetricSummary {
                    metric: row.metric.clone(),
                    passed: usize::from(row.passed),
                    total: 1,
                }),
            }
        }
        summaries
    }

    /// Strict aggregate: true only when every metric passed for every case.
    pub fn all_passed(&self) -> bool {
        self.rows.iter().all(|r| r.passed)
    }
}
