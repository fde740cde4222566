use crate::config::Settings;
use crate::metrics_api::{Metric, MetricResult};
use crate::model::EvalCase;
use crate::report::{Report, ResultRow};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

const DEFAULT_PARALLEL: usize = 4;

/// Fans a batch of cases out to every registered metric and aggregates the
/// per-(case, metric) results. Metrics are shared read-only configuration;
/// each evaluation writes only its own row, so cases run concurrently
/// without locking.
pub struct Harness {
    metrics: Vec<Arc<dyn Metric>>,
    parallel: usize,
}

impl Harness {
    pub fn new(metrics: Vec<Arc<dyn Metric>>) -> Self {
        Self {
            metrics,
            parallel: DEFAULT_PARALLEL,
        }
    }

    pub fn with_parallelism(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }

    /// Apply batch-config settings: `parallel` bounds case fan-out.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.parallel = settings.parallel.unwrap_or(DEFAULT_PARALLEL).max(1);
        self
    }

    /// Run the batch; rows are collected in completion order internally but
    /// returned sorted by (case index, metric name) for deterministic
    /// reports. A failing metric never aborts the batch: its row records
    /// score 0.0 and the error text as the rationale.
    pub async fn run(&self, cases: Vec<EvalCase>) -> anyhow::Result<Report> {
        let total_cases = cases.len();
        let sem = Arc::new(Semaphore::new(self.parallel));
        let mut join_set = JoinSet::new();

        let mut spawned: HashMap<tokio::task::Id, (usize, String)> = HashMap::new();
        for (case_index, case) in cases.into_iter().enumerate() {
            let permit = sem.clone().acquire_owned().await?;
            let metrics = self.metrics.clone();
            let input = case.input.clone();
            let handle = join_set.spawn(async move {
                let _permit = permit;
                evaluate_case(case_index, &case, &metrics).await
            });
            spawned.insert(handle.id(), (case_index, input));
        }

        let mut rows = Vec::new();
        while let Some(res) = join_set.join_next_with_id().await {
            match res {
                Ok((_id, case_rows)) => rows.extend(case_rows),
                Err(e) => {
                    // A panicked task loses its case; record a row per
                    // metric against that case rather than dropping it.
                    let (case_index, input) = spawned
                        .get(&e.id())
                        .cloned()
                        .unwrap_or_else(|| (usize::MAX, "unknown".to_string()));
                    tracing::warn!(error = %e, case = %input, "case evaluation task failed");
                    for metric in &self.metrics {
                        rows.push(ResultRow {
                            case_index,
                            input: input.clone(),
                            metric: metric.name().to_string(),
                            score: 0.0,
                            passed: false,
                            reason: format!("task error: {}", e),
                            duration_ms: None,
                        });
                    }
                }
            }
        }

        rows.sort_by(|a, b| {
            (a.case_index, a.metric.as_str()).cmp(&(b.case_index, b.metric.as_str()))
        });

        Ok(Report { total_cases, rows })
    }
}

/// Evaluate every metric against one case. All metrics run before the
/// case's rows are complete; order between metrics is unspecified.
async fn evaluate_case(
    case_index: usize,
    case: &EvalCase,
    metrics: &[Arc<dyn Metric>],
) -> Vec<ResultRow> {
    let mut rows = Vec::with_capacity(metrics.len());
    for metric in metrics {
        let started = Instant::now();
        let result = match metric.evaluate(case).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(metric = %metric.name(), case = %case.input, error = %e, "metric evaluation failed");
                MetricResult {
                    score: 0.0,
                    passed: false,
                    reason: format!("evaluation error: {}", e),
                }
            }
        };
        rows.push(ResultRow {
            case_index,
            input: case.input.clone(),
            metric: metric.name().to_string(),
            score: result.score,
            passed: result.passed,
            reason: result.reason,
            duration_ms: Some(started.elapsed().as_millis() as u64),
        });
    }
    rows
}
