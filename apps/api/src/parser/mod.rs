//! Structured Parser: turns free text into a fixed JSON schema via the language service.
//!
//! Two modes share one call path: `Resume` extracts a candidate profile, `Query`
//! interprets a recruiter search into a `CandidateFilter`. Any failure (service
//! error, empty output, non-JSON, wrong shape) is a `ParseError`; nothing here panics.

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NULL_FIELDS_INSTRUCTION};
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};
use crate::search::filter::CandidateFilter;

pub mod handlers;
pub mod prompts;
pub mod schema;

use prompts::{QUERY_PROMPT_TEMPLATE, RESUME_PROMPT_TEMPLATE};
use schema::ParsedResume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    Resume,
    Query,
}

impl ParseMode {
    fn template(self) -> &'static str {
        match self {
            ParseMode::Resume => RESUME_PROMPT_TEMPLATE,
            ParseMode::Query => QUERY_PROMPT_TEMPLATE,
        }
    }

    /// Builds the full prompt for this mode around the subject text.
    pub fn prompt(self, text: &str) -> String {
        self.template()
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
            .replace("{null_fields}", NULL_FIELDS_INSTRUCTION)
            .replace("{text}", text)
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Resume => f.write_str("resume"),
            ParseMode::Query => f.write_str("query"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("language service call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("{mode} response is not valid JSON: {source}")]
    InvalidJson {
        mode: ParseMode,
        source: serde_json::Error,
    },

    #[error("{mode} response is not a JSON object")]
    NotAnObject { mode: ParseMode },
}

/// Typed parse result plus the untouched model output.
#[derive(Debug, Clone, Serialize)]
pub struct Parsed<T> {
    pub value: T,
    pub raw_response: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "result", rename_all = "lowercase")]
pub enum StructuredResult {
    Resume(ParsedResume),
    Query(CandidateFilter),
}

#[derive(Clone)]
pub struct StructuredParser {
    llm: Arc<dyn TextGenerator>,
}

impl StructuredParser {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Interprets `text` under the given mode.
    pub async fn interpret(
        &self,
        text: &str,
        mode: ParseMode,
    ) -> Result<Parsed<StructuredResult>, ParseError> {
        match mode {
            ParseMode::Resume => self.parse_resume(text).await.map(|p| Parsed {
                value: StructuredResult::Resume(p.value),
                raw_response: p.raw_response,
            }),
            ParseMode::Query => self.interpret_query(text).await.map(|p| Parsed {
                value: StructuredResult::Query(p.value),
                raw_response: p.raw_response,
            }),
        }
    }

    pub async fn parse_resume(&self, resume_text: &str) -> Result<Parsed<ParsedResume>, ParseError> {
        self.call_json(resume_text, ParseMode::Resume).await
    }

    pub async fn interpret_query(&self, query: &str) -> Result<Parsed<CandidateFilter>, ParseError> {
        self.call_json(query, ParseMode::Query).await
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        text: &str,
        mode: ParseMode,
    ) -> Result<Parsed<T>, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let raw_response = self.llm.generate(&mode.prompt(text)).await?;
        let value = decode_object(&raw_response, mode)?;
        debug!("Parsed {mode} response ({} bytes)", raw_response.len());

        Ok(Parsed {
            value,
            raw_response,
        })
    }
}

/// Strips fences, then decodes a top-level JSON object into `T`.
fn decode_object<T: DeserializeOwned>(raw: &str, mode: ParseMode) -> Result<T, ParseError> {
    let json = strip_json_fences(raw);
    let value: Value =
        serde_json::from_str(json).map_err(|source| ParseError::InvalidJson { mode, source })?;
    if !value.is_object() {
        return Err(ParseError::NotAnObject { mode });
    }
    serde_json::from_value(value).map_err(|source| ParseError::InvalidJson { mode, source })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed response and records the prompts it was sent.
    pub(crate) struct CannedGenerator {
        response: Result<String, u16>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        pub(crate) fn replying(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                response: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    const RESUME_JSON: &str = r#"{"name": "John Doe", "email": "john.doe@email.com", "phone": "(555) 123-4567",
        "skills": ["Python", "JavaScript", "React"], "experience_years": 5,
        "education": "M.Sc. in Computer Science", "current_location": "New York, NY",
        "linkedin": "https://linkedin.com/in/johndoe", "github": "https://github.com/johndoe"}"#;

    fn parser(generator: CannedGenerator) -> StructuredParser {
        StructuredParser::new(Arc::new(generator))
    }

    #[tokio::test]
    async fn test_resume_parse_has_required_fields() {
        let parsed = parser(CannedGenerator::replying(RESUME_JSON))
            .parse_resume("JOHN DOE\nSoftware Engineer")
            .await
            .unwrap();
        let resume = parsed.value;
        assert_eq!(resume.name.as_deref(), Some("John Doe"));
        assert_eq!(resume.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(resume.skills.len(), 3);
        assert_eq!(resume.experience_years, Some(5));
        assert!(resume.education.is_some());
        assert_eq!(parsed.raw_response, RESUME_JSON);
    }

    #[tokio::test]
    async fn test_fenced_output_parses_like_unfenced() {
        let fenced = format!("```json\n{RESUME_JSON}\n```");
        let plain = parser(CannedGenerator::replying(RESUME_JSON))
            .parse_resume("resume")
            .await
            .unwrap();
        let wrapped = parser(CannedGenerator::replying(&fenced))
            .parse_resume("resume")
            .await
            .unwrap();
        assert_eq!(plain.value, wrapped.value);
    }

    #[tokio::test]
    async fn test_query_mode_builds_filter() {
        let response = r#"```
{"skills": ["Rust"], "min_experience_years": 5, "location": "Berlin", "job_title": null, "industry": null}
```"#;
        let generator = CannedGenerator::replying(response);
        let parser = parser(generator);
        let parsed = parser
            .interpret("senior rust devs in berlin, 5+ years", ParseMode::Query)
            .await
            .unwrap();
        match parsed.value {
            StructuredResult::Query(filter) => {
                assert_eq!(filter.skills, vec!["Rust"]);
                assert_eq!(filter.min_experience_years, Some(5));
                assert_eq!(filter.location.as_deref(), Some("Berlin"));
            }
            other => panic!("expected query result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_subject_text_and_instructions() {
        let generator = Arc::new(CannedGenerator::replying("{}"));
        let parser = StructuredParser::new(generator.clone());
        parser.interpret_query("python in london").await.unwrap();
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("python in london"));
        assert!(prompts[0].contains("min_experience_years"));
        assert!(prompts[0].contains(JSON_ONLY_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_non_json_output_is_parse_error() {
        let err = parser(CannedGenerator::replying("Sorry, I cannot help with that."))
            .parse_resume("resume")
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { mode: ParseMode::Resume, .. }));
    }

    #[tokio::test]
    async fn test_array_output_is_rejected() {
        let err = parser(CannedGenerator::replying(r#"["Rust", 5]"#))
            .interpret_query("rust")
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject { mode: ParseMode::Query }));
    }

    #[tokio::test]
    async fn test_service_failure_is_parse_error() {
        let err = parser(CannedGenerator::failing(503))
            .parse_resume("resume")
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::Llm(LlmError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_empty_input_skips_the_service() {
        let generator = Arc::new(CannedGenerator::replying(RESUME_JSON));
        let parser = StructuredParser::new(generator.clone());
        let err = parser.parse_resume("   \n").await.unwrap_err();
        assert!(matches!(err, ParseError::EmptyInput));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }
}
