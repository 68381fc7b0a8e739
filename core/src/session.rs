//! Hand-off records passed between steps through a key-value session store.
//!
//! Each step writes the key it owns and reads the key of the step before it.
//! Corrupt or missing entries read back as `None`; callers substitute defaults.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::model::{Course, GeneratedCourse, Profile};

pub const QUIZ_RESULT_KEY: &str = "personallearn.quiz_result";
pub const COURSE_KEY: &str = "personallearn.course";
pub const COURSE_PDF_KEY: &str = "personallearn.course_pdf";

/// Every key a session writes.
pub const SESSION_KEYS: [&str; 3] = [QUIZ_RESULT_KEY, COURSE_KEY, COURSE_PDF_KEY];

/// String-valued key-value storage scoped to the browser session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str);

    fn clear(&self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }
}

/// In-process store, used by tests and when browser storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

/// Written by the quiz step, read by the profile step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizHandoff {
    pub profile: Profile,
    pub score: u32,
    pub duration_seconds: f64,
}

/// Written by the profile step, read by the results step.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseHandoff {
    pub course: Course,
    pub pdf_base64: Option<String>,
}

impl From<GeneratedCourse> for CourseHandoff {
    fn from(generated: GeneratedCourse) -> Self {
        Self {
            course: generated.course,
            pdf_base64: generated.course_pdf_base64.filter(|p| !p.trim().is_empty()),
        }
    }
}

pub fn save_quiz_handoff<S: SessionStore + ?Sized>(
    store: &S,
    handoff: &QuizHandoff,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(handoff).map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.set(QUIZ_RESULT_KEY, &json)?;
    info!(
        "Stored quiz result: {} level, score {}",
        handoff.profile.level, handoff.score
    );
    Ok(())
}

pub fn load_quiz_handoff<S: SessionStore + ?Sized>(store: &S) -> Option<QuizHandoff> {
    let raw = store.get(QUIZ_RESULT_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(handoff) => Some(handoff),
        Err(e) => {
            warn!("Ignoring corrupt quiz result in session storage: {}", e);
            None
        }
    }
}

/// Stores the course and its PDF. The previous PDF is dropped before
/// anything is written, and a failed write leaves neither key behind, so a
/// course is never paired with another generation's PDF.
pub fn save_course_handoff<S: SessionStore + ?Sized>(
    store: &S,
    handoff: &CourseHandoff,
) -> Result<(), StoreError> {
    let json =
        serde_json::to_string(&handoff.course).map_err(|e| StoreError::Serialize(e.to_string()))?;

    store.remove(COURSE_PDF_KEY);
    let written = match &handoff.pdf_base64 {
        Some(pdf) => store.set(COURSE_PDF_KEY, pdf),
        None => Ok(()),
    }
    .and_then(|()| store.set(COURSE_KEY, &json));

    if let Err(e) = written {
        warn!("Failed to store course '{}': {}", handoff.course.title, e);
        store.remove(COURSE_KEY);
        store.remove(COURSE_PDF_KEY);
        return Err(e);
    }
    info!(
        "Stored course '{}' ({} units, pdf: {})",
        handoff.course.title,
        handoff.course.units.len(),
        handoff.pdf_base64.is_some()
    );
    Ok(())
}

pub fn load_course_handoff<S: SessionStore + ?Sized>(store: &S) -> Option<CourseHandoff> {
    let raw = store.get(COURSE_KEY)?;
    let course: Course = match serde_json::from_str(&raw) {
        Ok(course) => course,
        Err(e) => {
            warn!("Ignoring corrupt course in session storage: {}", e);
            return None;
        }
    };
    let pdf_base64 = store
        .get(COURSE_PDF_KEY)
        .filter(|pdf| !pdf.trim().is_empty());
    Some(CourseHandoff { course, pdf_base64 })
}

/// Drop every hand-off record so the next attempt starts clean.
pub fn clear_session<S: SessionStore + ?Sized>(store: &S) {
    store.clear(&SESSION_KEYS);
    info!("Cleared session hand-off records");
}
