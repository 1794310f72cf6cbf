// src/summary.rs

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;

use crate::config::Config;
use crate::models::quiz::Question;
use crate::models::submission::Submission;
use crate::stats;

/// Fixed degradation message: shown whenever the analysis cannot be
/// produced, regardless of the underlying failure.
pub const ANALYSIS_UNAVAILABLE: &str =
    "The AI consultant is currently unavailable. Please verify your configuration and try again.";

/// Returned without consuming an LLM call when a quiz has no submissions.
pub const ANALYSIS_NO_DATA: &str = "Insufficient data: No submissions found for analysis.";

/// Narrative analysis over one quiz's aggregated results.
///
/// Text in, text out. Implementations must degrade to
/// [`ANALYSIS_UNAVAILABLE`] on any failure (network, auth, empty
/// response) instead of propagating an error; the dashboard renders the
/// returned string as-is.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, questions: &[Question], submissions: &[Submission]) -> String;
}

/// Summarizer backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiSummarizer {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSummarizer {
    pub fn from_config(config: &Config) -> Self {
        let client = config.llm_api_key.as_ref().map(|key| {
            let mut openai_config = OpenAIConfig::default().with_api_key(key);
            if let Some(base) = &config.llm_api_base {
                openai_config = openai_config.with_api_base(base);
            }
            Client::with_config(openai_config)
        });
        if client.is_none() {
            tracing::warn!("LLM_API_KEY not set; AI analysis will report as unavailable");
        }
        Self {
            client,
            model: config.summary_model.clone(),
        }
    }

    async fn request_analysis(
        &self,
        client: &Client<OpenAIConfig>,
        questions: &[Question],
        submissions: &[Submission],
    ) -> Result<Option<String>, OpenAIError> {
        let report = stats::dashboard_stats(questions, submissions);
        let average = report
            .average_score
            .map_or_else(|| "n/a".to_string(), |avg| format!("{:.1}", avg));
        let breakdown = serde_json::to_string(&report.question_stats).unwrap_or_default();

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(
                "You are a world-class Legal Tech and AI Consultant. You analyze law firm \
                 AI maturity assessment data and produce high-impact, professional \
                 executive summaries in Markdown. Keep the tone authoritative, concise, \
                 and professional.",
            )
            .build()?;

        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(format!(
                "Analyze the following AI Maturity Assessment data.\n\n\
                 Assessment Data Summary:\n\
                 - Total Respondents: {}\n\
                 - Average Score: {}\n\
                 - Detailed Question Breakdown: {}\n\n\
                 The report must include:\n\
                 1. **Executive Status**: A summary of the firm's current AI maturity posture.\n\
                 2. **Critical Gaps**: Identify 2-3 significant weaknesses or opportunities for improvement.\n\
                 3. **Strategic Roadmap**: 3-4 prioritized actionable steps for leadership.\n\
                 4. **Assigned Maturity Tier**: Define where the firm sits (e.g., Laggard, Explorer, Advancing, or Leader).",
                report.total_submissions, average, breakdown
            ))
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.7)
            .messages(vec![system.into(), user.into()])
            .build()?;

        let response = client.chat().create(request).await?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty()))
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, questions: &[Question], submissions: &[Submission]) -> String {
        if submissions.is_empty() {
            return ANALYSIS_NO_DATA.to_string();
        }
        let Some(client) = &self.client else {
            return ANALYSIS_UNAVAILABLE.to_string();
        };

        match self.request_analysis(client, questions, submissions).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::error!("AI analysis returned an empty response");
                ANALYSIS_UNAVAILABLE.to_string()
            }
            Err(e) => {
                tracing::error!("AI analysis failed: {:?}", e);
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}
