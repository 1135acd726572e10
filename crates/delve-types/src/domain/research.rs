use serde::{Deserialize, Serialize};

/// Structured answer produced by one research turn.
///
/// This is the shape the agent is asked to return: the topic it answered,
/// free-text findings, and the ordered citations and tool names that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub topic: String,
    pub result: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

impl ResearchResponse {
    pub fn new(topic: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            result: result.into(),
            sources: Vec::new(),
            tools_used: Vec::new(),
        }
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools_used = tools.into_iter().map(Into::into).collect();
        self
    }
}
