//! Run configuration
//!
//! A [`Config`] is built once at process start and handed by reference to
//! every stage; nothing reads ambient state after that.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use insight_core::loader::dataset_name;
use insight_llm::ModelSettings;
use insight_stats::{DEFAULT_SEED, HEAD_ROWS};

/// Chat-completions endpoint used when none is configured
pub const DEFAULT_API_URL: &str = "http://aiproxy.sanand.workers.dev/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "AIPROXY_TOKEN";
pub const REPORT_FILE_NAME: &str = "README.md";

pub const DEFAULT_PLAN_MAX_TOKENS: u32 = 500;
pub const DEFAULT_NARRATIVE_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_CLUSTERS: usize = 3;

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub dataset_path: PathBuf,
    /// Directory receiving charts and the report
    pub output_dir: PathBuf,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub plan_max_tokens: u32,
    pub narrative_max_tokens: u32,
    /// Rows included in the summary sample
    pub sample_rows: usize,
    pub cluster_seed: u64,
    pub clusters: usize,
    /// `None` waits on the endpoint indefinitely
    pub request_timeout: Option<Duration>,
    /// Send the baseline heatmap inline with the narrative request
    pub attach_chart: bool,
}

impl Config {
    /// Defaults for `dataset_path`; output goes to `./<dataset stem>`
    pub fn new(dataset_path: impl Into<PathBuf>, api_key: impl Into<String>) -> Self {
        let dataset_path = dataset_path.into();
        let output_dir = default_output_dir(&dataset_path);
        Self {
            dataset_path,
            output_dir,
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            plan_max_tokens: DEFAULT_PLAN_MAX_TOKENS,
            narrative_max_tokens: DEFAULT_NARRATIVE_MAX_TOKENS,
            sample_rows: HEAD_ROWS,
            cluster_seed: DEFAULT_SEED,
            clusters: DEFAULT_CLUSTERS,
            request_timeout: None,
            attach_chart: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.cluster_seed = seed;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_attach_chart(mut self, attach_chart: bool) -> Self {
        self.attach_chart = attach_chart;
        self
    }

    pub fn plan_settings(&self) -> ModelSettings {
        ModelSettings::new(&self.model, self.plan_max_tokens)
    }

    pub fn narrative_settings(&self) -> ModelSettings {
        ModelSettings::new(&self.model, self.narrative_max_tokens)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }
}

// The token stays out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("dataset_path", &self.dataset_path)
            .field("output_dir", &self.output_dir)
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("plan_max_tokens", &self.plan_max_tokens)
            .field("narrative_max_tokens", &self.narrative_max_tokens)
            .field("sample_rows", &self.sample_rows)
            .field("cluster_seed", &self.cluster_seed)
            .field("clusters", &self.clusters)
            .field("request_timeout", &self.request_timeout)
            .field("attach_chart", &self.attach_chart)
            .finish()
    }
}

/// `<dataset stem>` relative to the working directory
pub fn default_output_dir(dataset_path: &Path) -> PathBuf {
    PathBuf::from(dataset_name(dataset_path))
}
