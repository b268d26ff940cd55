//! Shared fixtures for pipeline tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use insight_llm::{ChatRequest, LanguageModel, LlmError};

/// Model that answers from a fixed script and records every request
pub struct ScriptedModel {
    replies: RefCell<VecDeque<Result<String, LlmError>>>,
    pub requests: RefCell<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// A plan reply followed by a narrative reply
    pub fn plan_then_narrative(plan: &str, narrative: &str) -> Self {
        Self::new(vec![Ok(plan.to_string()), Ok(narrative.to_string())])
    }
}

impl LanguageModel for ScriptedModel {
    fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("script exhausted".to_string())))
    }
}

/// `age,income,city` with `rows` complete rows
pub fn people_csv(rows: usize) -> String {
    let cities = ["Oslo", "Rome", "Lima"];
    let mut csv = String::from("age,income,city\n");
    for i in 0..rows {
        let age = 20 + (i * 7) % 45;
        let income = 1000.0 * age as f64 + ((i * 37) % 500) as f64 + 0.5;
        csv.push_str(&format!("{age},{income},{}\n", cities[i % cities.len()]));
    }
    csv
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Image reference lines of a report
pub fn chart_lines(report: &str) -> Vec<&str> {
    report.lines().filter(|l| l.starts_with("![")).collect()
}
