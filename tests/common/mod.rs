//! Fixtures shared by the end-to-end tests

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

pub const CHAT_PATH: &str = "/openai/v1/chat/completions";

/// Reply content that parses as a plan and reads as a non-empty narrative
pub const PAIR_PLAN: &str = r#"{"column_pairs": [{"column1": "age", "column2": "income"}]}"#;

pub fn chat_body(content: &str) -> Value {
    json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// `age` (int), `income` (float), `city` (text); no missing values
pub fn people_csv(rows: usize) -> String {
    let cities = ["Oslo", "Rome", "Lima", "Pune"];
    let mut csv = String::from("age,income,city\n");
    for i in 0..rows {
        let age = 18 + (i * 13) % 50;
        let income = 850.0 * age as f64 + ((i * 53) % 900) as f64 + 0.25;
        csv.push_str(&format!("{age},{income},{}\n", cities[i % cities.len()]));
    }
    csv
}

pub fn write_dataset(dir: &Path, rows: usize) -> PathBuf {
    let path = dir.join("people.csv");
    fs::write(&path, people_csv(rows)).unwrap();
    path
}

pub fn chart_lines(report: &str) -> Vec<&str> {
    report.lines().filter(|l| l.starts_with("![")).collect()
}
