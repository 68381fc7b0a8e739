//! Thin client for the PersonalLearn backend.
//!
//! Three calls: list quiz questions, submit a quiz result for a profile, and
//! request course generation from an uploaded PDF. The read path never fails
//! (bundled questions are substituted); write paths return [`ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::{AppConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::content;
use crate::error::ApiError;
use crate::model::{
    BackendQuiz, CourseRequest, GeneratedCourse, Profile, ProfileRequest, QuizQuestion,
};

/// Questions for the quiz step, tagged with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSet {
    Loaded(Vec<QuizQuestion>),
    Fallback(Vec<QuizQuestion>),
}

impl QuestionSet {
    pub fn questions(&self) -> &[QuizQuestion] {
        match self {
            QuestionSet::Loaded(q) | QuestionSet::Fallback(q) => q,
        }
    }

    pub fn into_questions(self) -> Vec<QuizQuestion> {
        match self {
            QuestionSet::Loaded(q) | QuestionSet::Fallback(q) => q,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, QuestionSet::Fallback(_))
    }
}

/// Backend operations the step flows depend on.
#[async_trait(?Send)]
pub trait LearningApi {
    async fn fetch_quiz_questions(&self) -> QuestionSet;

    async fn submit_quiz_profile(
        &self,
        score: u32,
        duration_seconds: f64,
    ) -> Result<Profile, ApiError>;

    async fn submit_course_request(
        &self,
        request: CourseRequest,
    ) -> Result<GeneratedCourse, ApiError>;
}

/// HTTP implementation of [`LearningApi`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl ApiClient {
    /// `base` must be absolute (see [`AppConfig::with_origin`]).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base.clone()).with_timeout(config.request_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /quiz` without the fallback, so callers can see why it failed.
    pub async fn try_fetch_quiz_questions(&self) -> Result<Vec<QuizQuestion>, ApiError> {
        let response = self
            .client
            .get(self.url("/quiz"))
            .timeout(self.timeout)
            .send()
            .await?;

        let quiz: BackendQuiz = read_json(response).await?;
        let total = quiz.questions.len();
        let questions: Vec<QuizQuestion> = quiz
            .questions
            .into_iter()
            .map(QuizQuestion::from)
            .filter(QuizQuestion::is_well_formed)
            .collect();

        if questions.len() < total {
            warn!(
                "Dropped {} malformed quiz question(s) from backend",
                total - questions.len()
            );
        }
        if questions.is_empty() {
            return Err(ApiError::Decode("quiz contained no usable questions".to_string()));
        }
        Ok(questions)
    }
}

#[async_trait(?Send)]
impl LearningApi for ApiClient {
    async fn fetch_quiz_questions(&self) -> QuestionSet {
        match self.try_fetch_quiz_questions().await {
            Ok(questions) => {
                info!("Loaded {} quiz questions from backend", questions.len());
                QuestionSet::Loaded(questions)
            }
            Err(e) => {
                warn!("Quiz questions unavailable ({}), using bundled set", e);
                QuestionSet::Fallback(content::fallback_questions())
            }
        }
    }

    async fn submit_quiz_profile(
        &self,
        score: u32,
        duration_seconds: f64,
    ) -> Result<Profile, ApiError> {
        info!(
            "Submitting quiz result: score={} duration={:.1}s",
            score, duration_seconds
        );
        let response = self
            .client
            .post(self.url("/profile"))
            .timeout(self.timeout)
            .json(&ProfileRequest {
                score,
                duration_seconds: duration_seconds.max(0.0),
            })
            .send()
            .await?;

        read_json(response).await
    }

    async fn submit_course_request(
        &self,
        request: CourseRequest,
    ) -> Result<GeneratedCourse, ApiError> {
        info!(
            "Requesting course '{}' ({} level, {} units) from {} ({} bytes)",
            request.course_title,
            request.level,
            request.units,
            request.file.name,
            request.file.bytes.len()
        );

        let file = Part::bytes(request.file.bytes)
            .file_name(request.file.name)
            .mime_str("application/pdf")?;
        let form = Form::new()
            .text("course_title", request.course_title)
            .text("level", request.level)
            .text("units", request.units.to_string())
            .text("include_pdf", "true")
            .part("file", file);

        let response = self
            .client
            .post(self.url("/course"))
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Check status, then decode the body as `T`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = rejection_detail(status, &body);
        warn!("Backend rejected request: {} - {}", status.as_u16(), detail);
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Server `detail` field, else the raw body, else the status reason.
pub(crate) fn rejection_detail(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(detail) = map.get("detail").and_then(|d| d.as_str()) {
            if !detail.trim().is_empty() {
                return detail.to_string();
            }
        }
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_field_preferred() {
        let detail = rejection_detail(
            StatusCode::BAD_GATEWAY,
            r#"{"detail": "Gemini returned invalid JSON"}"#,
        );
        assert_eq!(detail, "Gemini returned invalid JSON");
    }

    #[test]
    fn test_raw_body_when_no_detail() {
        let detail = rejection_detail(StatusCode::INTERNAL_SERVER_ERROR, "boom\n");
        assert_eq!(detail, "boom");

        let detail = rejection_detail(StatusCode::UNPROCESSABLE_ENTITY, r#"{"error": "x"}"#);
        assert_eq!(detail, r#"{"error": "x"}"#);
    }

    #[test]
    fn test_status_text_when_body_empty() {
        assert_eq!(
            rejection_detail(StatusCode::SERVICE_UNAVAILABLE, "  "),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_client_trims_base() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/quiz"), "http://localhost:8000/quiz");
    }

    #[test]
    fn test_question_set_tags() {
        let set = QuestionSet::Fallback(content::fallback_questions());
        assert!(set.is_fallback());
        assert_eq!(set.questions().len(), 3);
        assert!(!QuestionSet::Loaded(vec![]).is_fallback());
    }
}
