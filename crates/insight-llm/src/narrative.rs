//! Narrative requester: asks the model to write up the findings

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use insight_core::AnalysisResult;
use insight_stats::Summary;
use tracing::{info, instrument};

use crate::client::{ChatMessage, ChatRequest, ContentPart, ImageUrl, LanguageModel, ModelSettings};
use crate::error::{LlmError, Result};

const SYSTEM_PROMPT: &str = "As a creative data analyst, use the dataset summary and the analysis \
results to write Markdown for a concise and engaging narrative. Describe the data, the analyses \
performed, the insights discovered and the implications of the findings.";

/// A chart sent inline with the narrative request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    media_type: String,
    bytes: Vec<u8>,
}

impl InlineImage {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn svg(bytes: Vec<u8>) -> Self {
        Self::new("image/svg+xml", bytes)
    }

    /// `data:` URL carrying the image as base64
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }
}

/// Build the narrative request from the summary and completed results
pub fn build_narrative_request(
    summary: &Summary,
    results: &[AnalysisResult],
    chart: Option<&InlineImage>,
    settings: &ModelSettings,
) -> Result<ChatRequest> {
    let text = format!(
        "Summary: {}\n\nAnalysis results: {}",
        serde_json::to_string(summary)?,
        serde_json::to_string(results)?
    );

    let user = match chart {
        None => ChatMessage::user(text),
        Some(image) => ChatMessage::user_parts(vec![
            ContentPart::Text { text },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.data_url(),
                },
            },
        ]),
    };

    Ok(ChatRequest::new(
        settings,
        vec![ChatMessage::system(SYSTEM_PROMPT), user],
    ))
}

/// Ask `model` for the report narrative
#[instrument(skip_all, fields(dataset = %summary.name, results = results.len()))]
pub fn request_narrative<M: LanguageModel>(
    model: &M,
    summary: &Summary,
    results: &[AnalysisResult],
    chart: Option<&InlineImage>,
    settings: &ModelSettings,
) -> Result<String> {
    let request = build_narrative_request(summary, results, chart, settings)?;
    let narrative = model.complete(&request)?;

    let narrative = narrative.trim();
    if narrative.is_empty() {
        return Err(LlmError::InvalidResponse("Narrative is empty".to_string()));
    }

    info!(chars = narrative.len(), "narrative received");
    Ok(narrative.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::{AnalysisOutput, AnalysisRequest, Column, Dataset};

    fn summary() -> Summary {
        let dataset = Dataset::new(
            "people",
            vec![Column::float("income", vec![Some(1.0), Some(2.0), Some(4.0)])],
        )
        .unwrap();
        insight_stats::summarize(&dataset)
    }

    fn clustering_result() -> AnalysisResult {
        AnalysisResult::new(
            AnalysisRequest::clustering(["income", "age"]),
            AnalysisOutput::Clustering {
                observations: 3,
                labels: vec![0, 1, 2],
                centroids: vec![vec![1.0, 2.0], vec![5.0, 1.0], vec![9.0, 7.0]],
                cluster_sizes: vec![1, 1, 1],
                inertia: 0.0,
                iterations: 1,
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_data_url() {
        let image = InlineImage::svg(b"<svg/>".to_vec());
        assert_eq!(image.data_url(), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_request_without_chart() {
        let settings = ModelSettings::new("gpt-4o-mini", 1000);
        let request = build_narrative_request(&summary(), &[clustering_result()], None, &settings).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["max_tokens"], 1000);
        assert!(json.get("response_format").is_none());
        let text = json["messages"][1]["content"].as_str().unwrap();
        assert!(text.starts_with("Summary: {"));
        assert!(text.contains("\"cluster_sizes\":[1,1,1]"));
        assert!(!text.contains("\"labels\""));
    }

    #[test]
    fn test_request_with_chart() {
        let settings = ModelSettings::new("gpt-4o-mini", 1000);
        let image = InlineImage::svg(b"<svg/>".to_vec());
        let request = build_narrative_request(&summary(), &[], Some(&image), &settings).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
