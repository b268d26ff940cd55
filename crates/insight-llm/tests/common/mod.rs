//! Shared helpers for chat endpoint tests

use insight_core::{Column, Dataset};
use insight_stats::Summary;
use serde_json::{json, Value};

pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const TOKEN: &str = "test-token";

/// Minimal chat-completions body whose first choice carries `content`
pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

pub fn people_summary() -> Summary {
    let dataset = Dataset::new(
        "people",
        vec![
            Column::integer("age", (0..10).map(|i| Some(20 + i)).collect()),
            Column::float("income", (0..10).map(|i| Some(1000.0 * i as f64)).collect()),
        ],
    )
    .unwrap();
    insight_stats::summarize(&dataset)
}
