/// Number of leading characters inspected for a bare `1` or `0` verdict.
const LEAD_CHARS: usize = 5;

/// Map a free-text judge response to a score in [0, 1].
///
/// Rules are checked in priority order and the first hit wins:
/// 1. leading slice contains `1`, or the response contains "excellent" -> 1.0
/// 2. leading slice contains `0`, or the response contains "poor"      -> 0.0
/// 3. response contains "0.8" or "0.9"                                  -> 0.9
/// 4. response contains "0.6" or "0.7"                                  -> 0.7
/// 5. otherwise -> 0.5 (indeterminate; nothing recognizable in the text)
///
/// Reordering the rules changes results for ambiguous responses, so the
/// order is part of the contract. Keyword matches are case-insensitive;
/// the numeric-band matches are literal substring scans.
pub fn extract_score(text: &str) -> f64 {
    let lead: String = text.chars().take(LEAD_CHARS).collect();
    let lower = text.to_lowercase();
    if lead.contains('1') || lower.contains("excellent") {
        1.0
    } else if lead.contains('0') || lower.contains("poor") {
        0.0
    } else if text.contains("0.8") || text.contains("0.9") {
        0.9
    } else if text.contains("0.6") || text.contains("0.7") {
        0.7
    } else {
        0.5
    }
}
