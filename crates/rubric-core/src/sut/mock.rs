use super::QueryBackend;
use crate::model::BackendResponse;
use async_trait::async_trait;

/// Answer returned when no entry matches the query.
pub const FALLBACK_ANSWER: &str = "I don't have data on that topic. Please refine your question.";

#[derive(Debug, Clone)]
struct MockEntry {
    key: &'static str,
    context: &'static [&'static str],
    answer: &'static str,
}

/// Static keyword-to-answer backend used to exercise the harness without a
/// live service. Entries are held in a `Vec` and scanned in declaration
/// order: the first key found as a substring of the lowercased query wins,
/// so precedence is fixed and identical on every platform. No match yields
/// the fallback answer and empty context.
#[derive(Debug, Clone)]
pub struct MockBackend {
    entries: Vec<MockEntry>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            entries: vec![
                MockEntry {
                    key: "crime rate",
                    context: &["NYPD data shows a 2% drop in overall crime in 2023."],
                    answer: "The crime rate in New York dropped by about 2% in 2023, \
                             mainly due to reduced burglaries and assaults.",
                },
                MockEntry {
                    key: "burglary",
                    context: &["Burglary incidents were highest in precincts 19 and 23 last year."],
                    answer: "Burglary incidents peaked in precincts 19 and 23, but overall \
                             numbers declined compared to 2022.",
                },
                MockEntry {
                    key: "initiative",
                    context: &["Community policing and neighborhood safety programs launched in 2024."],
                    answer: "Several community safety programs were launched in 2024 to \
                             improve neighborhood policing.",
                },
                MockEntry {
                    key: "larceny",
                    context: &["Grand larceny in New York is theft over $1,000 (Penal Law Article 155)."],
                    answer: "Grand larceny in New York refers to theft over $1,000, as \
                             defined under Penal Law Article 155.",
                },
            ],
        }
    }
}

impl MockBackend {
    /// Pure lookup; the async trait impl is a thin wrapper around this.
    pub fn lookup(&self, query: &str) -> BackendResponse {
        let query = query.to_lowercase();
        for entry in &self.entries {
            if query.contains(entry.key) {
                return BackendResponse {
                    output: entry.answer.to_string(),
                    retrieval_context: entry.context.iter().map(|s| s.to_string()).collect(),
                };
            }
        }
        BackendResponse {
            output: FALLBACK_ANSWER.to_string(),
            retrieval_context: Vec::new(),
        }
    }
}

#[async_trait]
impl QueryBackend for MockBackend {
    async fn fetch(&self, query: &str) -> anyhow::Result<BackendResponse> {
        Ok(self.lookup(query))
    }
}
