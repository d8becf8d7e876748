use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    #[default]
    Explain,
    Summarize,
}

impl ProcessingMode {
    /// Label of the output pane.
    pub fn output_label(&self) -> &'static str {
        match self {
            ProcessingMode::Explain => "Explanation",
            ProcessingMode::Summarize => "Summary",
        }
    }

    pub fn fallback_text(&self) -> &'static str {
        match self {
            ProcessingMode::Explain => "Could not explain text.",
            ProcessingMode::Summarize => "Could not summarize text.",
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingMode::Explain => write!(f, "explain"),
            ProcessingMode::Summarize => write!(f, "summarize"),
        }
    }
}

impl From<&str> for ProcessingMode {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "summarize" | "summarise" | "summary" => ProcessingMode::Summarize,
            _ => ProcessingMode::Explain,
        }
    }
}

impl From<String> for ProcessingMode {
    fn from(s: String) -> Self {
        ProcessingMode::from(s.as_str())
    }
}

/// Both panes of one upload-and-process cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub timestamp: String,
    pub image_path: Option<String>,
    pub mode: ProcessingMode,
    pub extracted_text: String,
    pub output: String,
}

impl PipelineOutput {
    pub fn new(
        timestamp: String,
        image_path: Option<String>,
        mode: ProcessingMode,
        extracted_text: String,
        output: String,
    ) -> Self {
        Self {
            timestamp,
            image_path,
            mode,
            extracted_text,
            output,
        }
    }
}
