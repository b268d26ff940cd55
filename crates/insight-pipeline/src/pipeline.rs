//! Run orchestration
//!
//! Load → summarize → plan → execute → narrate → report, strictly in that
//! order. Loading, planning and storage failures end the run; analysis and
//! narrative failures degrade it.

use std::fs;
use std::path::PathBuf;

use insight_core::{loader, AnalysisKind};
use insight_llm::{request_narrative, request_plan, ChatClient, InlineImage, LanguageModel};
use insight_stats::Summary;
use tracing::{info, instrument, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::executor::{self, ExecutionReport};
use crate::report;

/// Whether the report carries model-written prose
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeStatus {
    Generated,
    /// The request failed; the report holds charts only
    Failed(String),
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub completed: usize,
    pub skipped: usize,
    pub artifacts: Vec<PathBuf>,
    pub narrative: NarrativeStatus,
}

/// One configured run against a language model
pub struct Pipeline<'a, M> {
    config: &'a Config,
    model: M,
}

impl<'a, M: LanguageModel> Pipeline<'a, M> {
    pub fn new(config: &'a Config, model: M) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    #[instrument(skip_all, fields(dataset = %self.config.dataset_path.display()))]
    pub fn run(&self) -> Result<RunSummary> {
        let config = self.config;

        let dataset = loader::load(&config.dataset_path).map_err(|source| PipelineError::Load {
            path: config.dataset_path.clone(),
            source,
        })?;

        let summary = Summary::from_dataset(&dataset, config.sample_rows);
        info!(rows = summary.shape.0, columns = summary.shape.1, "dataset summarized");

        let plan = request_plan(&self.model, &summary, &config.plan_settings()).map_err(PipelineError::Plan)?;

        fs::create_dir_all(&config.output_dir)
            .map_err(|e| PipelineError::storage(&config.output_dir, e))?;

        let catalog = Catalog::from_config(config);
        let execution = executor::execute(&catalog, &dataset, &plan);

        let chart = if config.attach_chart {
            baseline_chart(&execution)
        } else {
            None
        };

        let (narrative, status) = match request_narrative(
            &self.model,
            &summary,
            execution.results(),
            chart.as_ref(),
            &config.narrative_settings(),
        ) {
            Ok(text) => (text, NarrativeStatus::Generated),
            Err(e) => {
                warn!(error = %e, "narrative request failed, writing a chart-only report");
                (
                    report::degraded_narrative(dataset.name(), &e.to_string()),
                    NarrativeStatus::Failed(e.to_string()),
                )
            }
        };

        let artifacts = execution.artifacts();
        let report_path = report::write_report(&config.output_dir, &narrative, &artifacts)
            .map_err(|e| PipelineError::storage(config.report_path(), e))?;

        Ok(RunSummary {
            report_path,
            completed: execution.results().len(),
            skipped: execution.skipped().len(),
            artifacts: artifacts.iter().map(|a| a.path.clone()).collect(),
            narrative: status,
        })
    }
}

/// The baseline heatmap, read for inline transmission
fn baseline_chart(execution: &ExecutionReport) -> Option<InlineImage> {
    let artifact = execution
        .results()
        .iter()
        .find(|r| r.kind() == AnalysisKind::CorrelationMatrix)?
        .artifacts
        .first()?;

    match fs::read(&artifact.path) {
        Ok(bytes) => Some(InlineImage::svg(bytes)),
        Err(e) => {
            warn!(path = %artifact.path.display(), error = %e, "could not read chart for the narrative request");
            None
        }
    }
}

/// Run `config` against its HTTP endpoint
pub fn run(config: &Config) -> Result<RunSummary> {
    let client = ChatClient::new(&config.api_url, &config.api_key, config.request_timeout)
        .map_err(PipelineError::Client)?;
    Pipeline::new(config, client).run()
}
