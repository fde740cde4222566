//! LLM-judge scoring protocol: deterministic grading-prompt rendering and
//! the heuristic that maps a free-text judge response to a numeric score.
//! Both halves are pure so they can be tested without any network I/O.

pub mod prompt;
pub mod score;
