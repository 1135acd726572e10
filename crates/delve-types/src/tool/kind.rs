use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capabilities a research agent may be handed
///
/// A closed set: the agent layer dispatches on the variant, never on a
/// free-form name lookup. The names are the ones recorded in an entry's
/// `tools_used` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Web search
    #[serde(rename = "search")]
    Search,
    /// Save findings to a plain text file
    #[serde(rename = "save_to_txt")]
    SaveText,
    /// Save findings to a JSON file
    #[serde(rename = "save_to_json")]
    SaveJson,
    /// Save findings to a Markdown file
    #[serde(rename = "save_to_markdown")]
    SaveMarkdown,
    /// Encyclopedia lookup
    #[serde(rename = "wikipedia")]
    Encyclopedia,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Search,
        ToolKind::SaveText,
        ToolKind::SaveJson,
        ToolKind::SaveMarkdown,
        ToolKind::Encyclopedia,
    ];

    /// Name the tool is registered under with the agent
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Search => "search",
            ToolKind::SaveText => "save_to_txt",
            ToolKind::SaveJson => "save_to_json",
            ToolKind::SaveMarkdown => "save_to_markdown",
            ToolKind::Encyclopedia => "wikipedia",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Search => "Search the web for information",
            ToolKind::SaveText => "Save the data to a text file",
            ToolKind::SaveJson => "Save the data to a JSON file",
            ToolKind::SaveMarkdown => "Save the data to a Markdown file",
            ToolKind::Encyclopedia => "Look up a topic in the encyclopedia",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown tool '{}'", s))
    }
}
