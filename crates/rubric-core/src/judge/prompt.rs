use crate::model::EvalCase;

/// Delimiter used to flatten the retrieved-context items into one line.
pub const CONTEXT_DELIMITER: &str = " | ";

/// Render the grading prompt for one case. Field order is fixed: criteria,
/// query, retrieved context (omitted entirely when `include_context` is
/// false), expected answer, actual answer, rating instruction. Identical
/// inputs must produce byte-identical prompts; audit trails depend on it.
pub fn build_grading_prompt(criteria: &str, case: &EvalCase, include_context: bool) -> String {
    let context_line = if include_context {
        format!(
            "Retrieved context: {}\n",
            case.retrieval_context.join(CONTEXT_DELIMITER)
        )
    } else {
        String::new()
    };
    format!(
        "You are evaluating a model answer based on the following criteria.\n\n\
         **Criteria:** {}\n\n\
         User query: {}\n\
         {}\
         Expected answer: {}\n\
         Model answer: {}\n\n\
         Rate the answer from 0 (poor) to 1 (excellent) and provide a short reason.",
        criteria, case.input, context_line, case.expected_output, case.actual_output
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> EvalCase {
        EvalCase::new(
            "Tell me about crime rate",
            "The crime rate dropped by about 2% in 2023.",
            "NYPD data shows a 2% drop in overall crime in 2023.",
            vec!["doc one".into(), "doc two".into()],
        )
        .unwrap()
    }

    #[test]
    fn fields_appear_in_fixed_order() {
        let p = build_grading_prompt("factually consistent", &case(), true);
        let idx = |needle: &str| p.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        assert!(idx("**Criteria:** factually consistent") < idx("User query:"));
        assert!(idx("User query:") < idx("Retrieved context:"));
        assert!(idx("Retrieved context:") < idx("Expected answer:"));
        assert!(idx("Expected answer:") < idx("Model answer:"));
        assert!(p.ends_with("provide a short reason."));
    }

    #[test]
    fn context_items_joined_with_fixed_delimiter() {
        let p = build_grading_prompt("c", &case(), true);
        assert!(p.contains("Retrieved context: doc one | doc two\n"));
    }

    #[test]
    fn context_free_variant_omits_context_section() {
        let p = build_grading_prompt("c", &case(), false);
        assert!(!p.contains("Retrieved context:"));
        assert!(p.contains("User query:"));
    }

    #[test]
    fn rendering_is_byte_identical_across_calls() {
        let a = build_grading_prompt("c", &case(), true);
        let b = build_grading_prompt("c", &case(), true);
        assert_eq!(a, b);
    }
}
