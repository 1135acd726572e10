mod pdf;

use crate::{Error, Result};
use chrono::{DateTime, Local};
use delve_types::ResearchResponse;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const MAX_TOPIC_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Txt,
    Json,
    Markdown,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Txt,
        ExportFormat::Json,
        ExportFormat::Markdown,
        ExportFormat::Pdf,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "txt" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Writes research answers to report files under one output directory.
///
/// All files written by one exporter share the timestamp taken when it was
/// created, both in their names and in their "Generated" line.
pub struct Exporter {
    output_dir: PathBuf,
    generated_at: DateTime<Local>,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::at(output_dir, Local::now())
    }

    pub fn at(output_dir: impl Into<PathBuf>, generated_at: DateTime<Local>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            generated_at,
        })
    }

    /// `<topic>_<YYYY-mm-dd_HH-MM-SS>.<ext>` with the topic reduced to
    /// alphanumerics, `-` and `_`.
    pub fn file_name(&self, format: ExportFormat, topic: &str) -> String {
        let kept: String = topic
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
            .collect();
        let clean: String = kept
            .trim_end()
            .replace(' ', "_")
            .chars()
            .take(MAX_TOPIC_CHARS)
            .collect();

        format!(
            "{}_{}.{}",
            clean,
            self.generated_at.format("%Y-%m-%d_%H-%M-%S"),
            format.extension()
        )
    }

    pub fn export(&self, format: ExportFormat, research: &ResearchResponse) -> Result<PathBuf> {
        let path = self.output_dir.join(self.file_name(format, &research.topic));
        let content = match format {
            ExportFormat::Txt => self.render_txt(research).into_bytes(),
            ExportFormat::Json => self.render_json(research)?.into_bytes(),
            ExportFormat::Markdown => self.render_markdown(research).into_bytes(),
            ExportFormat::Pdf => self.render_pdf(research),
        };

        std::fs::write(&path, content)?;
        tracing::info!(format = %format, path = %path.display(), "exported research");
        Ok(path)
    }

    /// Export to each named format, collecting a path or an error message
    /// per format instead of stopping at the first failure.
    pub fn export_all(
        &self,
        research: &ResearchResponse,
        formats: &[&str],
    ) -> BTreeMap<String, String> {
        formats
            .iter()
            .map(|name| {
                let outcome = name
                    .parse::<ExportFormat>()
                    .and_then(|format| self.export(format, research));
                let text = match outcome {
                    Ok(path) => path.display().to_string(),
                    Err(err) => format!("Error: {}", err),
                };
                (name.to_string(), text)
            })
            .collect()
    }

    fn stamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn render_txt(&self, research: &ResearchResponse) -> String {
        format!(
            "Research Report: {}\n\nResearch Results:\n{}\n\nSources:\n{}\n\nTools Used:\n{}\n\nGenerated: {}\n",
            research.topic,
            research.result,
            bullet_list(&research.sources),
            bullet_list(&research.tools_used),
            self.stamp()
        )
    }

    fn render_json(&self, research: &ResearchResponse) -> Result<String> {
        let value = serde_json::json!({
            "topic": research.topic,
            "result": research.result,
            "sources": research.sources,
            "tools_used": research.tools_used,
            "generated_at": self.generated_at.to_rfc3339(),
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn render_markdown(&self, research: &ResearchResponse) -> String {
        format!(
            "# Research Report: {}\n## Research Results\n{}\n\n## Sources\n{}\n\n## Tools Used\n{}\n\n<br>\n\n**Generated:** {}\n",
            research.topic,
            research.result,
            bullet_list(&research.sources),
            bullet_list(&research.tools_used),
            self.stamp()
        )
    }

    fn render_pdf(&self, research: &ResearchResponse) -> Vec<u8> {
        use pdf::Block;

        let mut blocks = vec![
            Block::Title(format!("Research Report: {}", research.topic)),
            Block::Gap(10.0),
            Block::Heading("Research Results".to_string()),
            Block::Body(research.result.clone()),
            Block::Gap(10.0),
            Block::Heading("Sources".to_string()),
        ];
        blocks.extend(research.sources.iter().cloned().map(Block::Bullet));
        blocks.push(Block::Gap(10.0));
        blocks.push(Block::Heading("Tools Used".to_string()));
        blocks.extend(research.tools_used.iter().cloned().map(Block::Bullet));
        blocks.push(Block::Gap(10.0));
        blocks.push(Block::Meta(format!("Generated: {}", self.stamp())));

        pdf::render(&blocks)
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
