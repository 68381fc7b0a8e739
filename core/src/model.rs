use serde::{Deserialize, Deserializer, Serialize};

// -- Quiz --

/// A single calibration question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Only the backend supplies ground truth; bundled questions leave this empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
}

impl QuizQuestion {
    pub fn new(prompt: &str, options: &[&str], correct: Option<&str>) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.map(str::to_string),
        }
    }

    /// Non-empty prompt and at least one option.
    pub fn is_well_formed(&self) -> bool {
        !self.prompt.trim().is_empty() && !self.options.is_empty()
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct.as_deref() == Some(answer)
    }
}

/// Question shape as served by `GET /quiz`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendQuestion {
    pub q: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct: Option<String>,
}

impl From<BackendQuestion> for QuizQuestion {
    fn from(q: BackendQuestion) -> Self {
        QuizQuestion {
            prompt: q.q,
            options: q.options,
            correct: q.correct,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendQuiz {
    pub questions: Vec<BackendQuestion>,
}

// -- Profile --

/// Backend-computed characterisation of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub level: String,
    pub units: u32,
    pub desc: String,
    pub efficiency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileRequest {
    pub score: u32,
    pub duration_seconds: f64,
}

// -- Course --

/// Self-check question attached to a generated unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitQuizQuestion {
    pub question: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_choice: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl UnitQuizQuestion {
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_choice
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub title: String,
    /// Generated courses send `content`; the bundled example uses `description`.
    #[serde(default, alias = "description")]
    pub content: String,
    #[serde(default, alias = "objective", deserialize_with = "one_or_many")]
    pub objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quiz_questions: Vec<UnitQuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Body of a successful `POST /course`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCourse {
    pub course: Course,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_pdf_base64: Option<String>,
}

/// A PDF picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Everything `POST /course` needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRequest {
    pub course_title: String,
    pub level: String,
    pub units: u32,
    pub file: PdfUpload,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
