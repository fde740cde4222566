pub mod exact_match;
pub mod judge_criteria;

pub use exact_match::ExactMatchMetric;
pub use judge_criteria::JudgeCriteriaMetric;
