use crate::report::Report;

const INPUT_WIDTH: usize = 40;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Render the per-(case, metric) table plus the aggregate footer to stderr.
pub fn print_summary(report: &Report) {
    eprintln!();
    for row in &report.rows {
        let icon = if row.passed { "✅" } else { "❌" };
        let duration = row
            .duration_ms
            .map(|d| format!("({:.1}s)", d as f64 / 1000.0))
            .unwrap_or_default();
        eprintln!(
            "{} [{}] {:<width$} {:<20} {:.2}  {}",
            icon,
            row.case_index,
            truncate(&row.input, INPUT_WIDTH),
            row.metric,
            row.score,
            duration,
            width = INPUT_WIDTH,
        );
        if !row.passed && !row.reason.is_empty() {
            eprintln!("    → {}", truncate(&row.reason, 120));
        }
    }

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for summary in report.metric_summaries() {
        eprintln!(
            "{:<20} {}/{} passed",
            summary.metric, summary.passed, summary.total
        );
    }
    let verdict = if report.all_passed() { "PASS" } else { "FAIL" };
    eprintln!("Cases: {}  Overall: {}", report.total_cases, verdict);
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_caps_long_strings_with_ellipsis() {
        let t = truncate("a very long input string indeed", 10);
        assert_eq!(t, "a very ...");
        assert!(t.chars().count() <= 10);
    }
}
