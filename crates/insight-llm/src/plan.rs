//! Plan requester: asks the model which analyses to run
//!
//! The model sees the dataset's column names and dtypes and answers with
//! `{"analyses": [...]}`, each step tagged by `"analysis"`. The older
//! `{"column_pairs": [...]}` shape is still understood and maps every pair to
//! a correlation.

use insight_core::AnalysisRequest;
use insight_stats::Summary;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::client::{ChatMessage, ChatRequest, JsonSchemaFormat, LanguageModel, ModelSettings, ResponseFormat};
use crate::error::{LlmError, Result};

/// Most analyses a plan may contain
pub const MAX_PLAN_STEPS: usize = 4;

const SCHEMA_NAME: &str = "analysis_plan";

const SYSTEM_PROMPT: &str = "You are a data analyst choosing follow-up analyses for a dataset. \
You are given the dataset's column names and types. Reply with a JSON object \
{\"analyses\": [...]} listing up to 4 analyses that would be informative. Each analysis is one of: \
{\"analysis\": \"correlation\", \"column1\": ..., \"column2\": ...} for two numeric columns, \
{\"analysis\": \"outlier_detection\", \"column\": ...} for one numeric column, or \
{\"analysis\": \"clustering\", \"columns\": [...]} for two or more numeric columns. \
Use only column names from the list you are given.";

#[derive(Deserialize)]
#[serde(untagged)]
enum PlanReply {
    Analyses { analyses: Vec<PlanStep> },
    Pairs { column_pairs: Vec<ColumnPair> },
}

#[derive(Deserialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
enum PlanStep {
    Correlation { column1: String, column2: String },
    OutlierDetection { column: String },
    Clustering { columns: Vec<String> },
}

#[derive(Deserialize)]
struct ColumnPair {
    column1: String,
    column2: String,
}

impl From<PlanStep> for AnalysisRequest {
    fn from(step: PlanStep) -> Self {
        match step {
            PlanStep::Correlation { column1, column2 } => Self::correlation(column1, column2),
            PlanStep::OutlierDetection { column } => Self::outliers(column),
            PlanStep::Clustering { columns } => Self::clustering(columns),
        }
    }
}

/// JSON schema the reply must satisfy
pub fn plan_schema() -> serde_json::Value {
    let string = json!({"type": "string"});
    json!({
        "type": "object",
        "properties": {
            "analyses": {
                "type": "array",
                "description": "Up to 4 analyses worth running on this dataset.",
                "items": {
                    "anyOf": [
                        {
                            "type": "object",
                            "properties": {
                                "analysis": {"type": "string", "enum": ["correlation"]},
                                "column1": string,
                                "column2": string
                            },
                            "required": ["analysis", "column1", "column2"],
                            "additionalProperties": false
                        },
                        {
                            "type": "object",
                            "properties": {
                                "analysis": {"type": "string", "enum": ["outlier_detection"]},
                                "column": string
                            },
                            "required": ["analysis", "column"],
                            "additionalProperties": false
                        },
                        {
                            "type": "object",
                            "properties": {
                                "analysis": {"type": "string", "enum": ["clustering"]},
                                "columns": {"type": "array", "items": string}
                            },
                            "required": ["analysis", "columns"],
                            "additionalProperties": false
                        }
                    ]
                }
            }
        },
        "required": ["analyses"],
        "additionalProperties": false
    })
}

/// Build the planning request for `summary`
pub fn build_plan_request(summary: &Summary, settings: &ModelSettings) -> Result<ChatRequest> {
    let columns: Vec<_> = summary
        .dtypes()
        .into_iter()
        .map(|(name, dtype)| json!({"name": name, "dtype": dtype}))
        .collect();
    let metadata = json!({
        "dataset": summary.name,
        "rows": summary.shape.0,
        "columns": columns,
    });

    let request = ChatRequest::new(
        settings,
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(serde_json::to_string(&metadata)?),
        ],
    )
    .with_response_format(ResponseFormat::JsonSchema {
        json_schema: JsonSchemaFormat {
            name: SCHEMA_NAME.to_string(),
            strict: true,
            schema: plan_schema(),
        },
    });

    Ok(request)
}

/// Parse the model's reply into analysis requests
///
/// Text around the JSON object (such as a Markdown code fence) is ignored.
/// Steps beyond [`MAX_PLAN_STEPS`] are dropped.
pub fn parse_plan(content: &str) -> Result<Vec<AnalysisRequest>> {
    let reply: PlanReply = match serde_json::from_str(content.trim()) {
        Ok(reply) => reply,
        Err(e) => {
            let embedded = match (content.find('{'), content.rfind('}')) {
                (Some(start), Some(end)) if start < end => &content[start..=end],
                _ => return Err(LlmError::Parse(format!("Response is not JSON: {e}. Raw: {content}"))),
            };
            serde_json::from_str(embedded).map_err(|e| {
                LlmError::Parse(format!("Reply does not match the plan schema: {e}. Raw: {content}"))
            })?
        }
    };

    let mut requests: Vec<AnalysisRequest> = match reply {
        PlanReply::Analyses { analyses } => analyses.into_iter().map(AnalysisRequest::from).collect(),
        PlanReply::Pairs { column_pairs } => column_pairs
            .into_iter()
            .map(|pair| AnalysisRequest::correlation(pair.column1, pair.column2))
            .collect(),
    };

    if requests.len() > MAX_PLAN_STEPS {
        warn!(
            proposed = requests.len(),
            kept = MAX_PLAN_STEPS,
            "plan has too many analyses, truncating"
        );
        requests.truncate(MAX_PLAN_STEPS);
    }

    Ok(requests)
}

/// Ask `model` for an analysis plan
#[instrument(skip_all, fields(dataset = %summary.name))]
pub fn request_plan<M: LanguageModel>(
    model: &M,
    summary: &Summary,
    settings: &ModelSettings,
) -> Result<Vec<AnalysisRequest>> {
    let request = build_plan_request(summary, settings)?;
    let content = model.complete(&request)?;
    debug!(%content, "plan reply");

    let plan = parse_plan(&content)?;
    info!(steps = plan.len(), "analysis plan received");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::{Column, Dataset};

    fn summary() -> Summary {
        let dataset = Dataset::new(
            "people",
            vec![
                Column::integer("age", vec![Some(30), Some(40)]),
                Column::float("income", vec![Some(1.0), Some(2.0)]),
            ],
        )
        .unwrap();
        insight_stats::summarize(&dataset)
    }

    #[test]
    fn test_parse_canonical_plan() {
        let content = r#"{"analyses": [
            {"analysis": "correlation", "column1": "age", "column2": "income"},
            {"analysis": "outlier_detection", "column": "income"},
            {"analysis": "clustering", "columns": ["income", "age"]}
        ]}"#;
        let plan = parse_plan(content).unwrap();

        assert_eq!(
            plan,
            vec![
                AnalysisRequest::correlation("age", "income"),
                AnalysisRequest::outliers("income"),
                AnalysisRequest::clustering(["income", "age"]),
            ]
        );
    }

    #[test]
    fn test_parse_column_pairs() {
        let content = r#"{"column_pairs": [{"column1": "age", "column2": "income"}]}"#;
        assert_eq!(
            parse_plan(content).unwrap(),
            vec![AnalysisRequest::correlation("age", "income")]
        );
    }

    #[test]
    fn test_parse_fenced_reply() {
        let content = "Here you go:\n```json\n{\"analyses\": [{\"analysis\": \"outlier_detection\", \"column\": \"age\"}]}\n```";
        assert_eq!(parse_plan(content).unwrap(), vec![AnalysisRequest::outliers("age")]);
    }

    #[test]
    fn test_parse_truncates_long_plans() {
        let steps: Vec<String> = (0..6)
            .map(|i| format!(r#"{{"analysis": "outlier_detection", "column": "c{i}"}}"#))
            .collect();
        let content = format!(r#"{{"analyses": [{}]}}"#, steps.join(","));
        let plan = parse_plan(&content).unwrap();

        assert_eq!(plan.len(), MAX_PLAN_STEPS);
        assert_eq!(plan[3], AnalysisRequest::outliers("c3"));
    }

    #[test]
    fn test_parse_empty_plan() {
        assert!(parse_plan(r#"{"analyses": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_analysis() {
        let content = r#"{"analyses": [{"analysis": "regression", "column": "age"}]}"#;
        assert!(matches!(parse_plan(content), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(parse_plan("I cannot help with that."), Err(LlmError::Parse(_))));
        assert!(matches!(parse_plan(r#"{"something": "else"}"#), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_build_plan_request() {
        let request = build_plan_request(&summary(), &ModelSettings::new("gpt-4o-mini", 500)).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["strict"], true);

        let user: serde_json::Value =
            serde_json::from_str(json["messages"][1]["content"].as_str().unwrap()).unwrap();
        assert_eq!(user["columns"][0], json!({"name": "age", "dtype": "int64"}));
        assert_eq!(user["columns"][1]["dtype"], "float64");
        assert_eq!(user["rows"], 2);
    }
}
