//! Language-model requests for insight
//!
//! Two requests are made per run: a plan request whose structured reply
//! selects follow-up analyses, and a narrative request that turns the
//! results into report prose. Both go through the [`LanguageModel`] trait so
//! the HTTP client can be swapped out.
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_llm::{ChatClient, ChatMessage, ChatRequest, LanguageModel, ModelSettings};
//!
//! let client = ChatClient::new("https://api.openai.com/v1/chat/completions", "sk-...", None)?;
//! let request = ChatRequest::new(
//!     &ModelSettings::new("gpt-4o-mini", 100),
//!     vec![ChatMessage::user("Say hello")],
//! );
//! println!("{}", client.complete(&request)?);
//! # Ok::<(), insight_llm::LlmError>(())
//! ```

pub mod client;
pub mod error;
pub mod narrative;
pub mod plan;

pub use client::{
    ChatClient, ChatMessage, ChatRequest, ContentPart, ImageUrl, JsonSchemaFormat, LanguageModel,
    MessageContent, ModelSettings, ResponseFormat, Role,
};
pub use error::{LlmError, Result};
pub use narrative::{build_narrative_request, request_narrative, InlineImage};
pub use plan::{build_plan_request, parse_plan, plan_schema, request_plan, MAX_PLAN_STEPS};
