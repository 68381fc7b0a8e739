//! Results step: the generated course, its PDF and the session reset.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

use crate::content;
use crate::error::FlowError;
use crate::model::Course;
use crate::nav::Step;
use crate::session::{clear_session, load_course_handoff, SessionStore};

/// A decoded PDF ready to be saved by the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub course: Course,
    pdf_base64: Option<String>,
    /// Nothing was generated; showing the bundled example.
    pub is_example: bool,
}

impl ResultsView {
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Self {
        match load_course_handoff(store) {
            Some(handoff) => Self {
                course: handoff.course,
                pdf_base64: handoff.pdf_base64,
                is_example: false,
            },
            None => Self {
                course: content::example_course(),
                pdf_base64: None,
                is_example: true,
            },
        }
    }

    pub fn can_download(&self) -> bool {
        self.pdf_base64.is_some()
    }

    pub fn pdf_download(&self) -> Result<PdfDownload, FlowError> {
        let payload = self.pdf_base64.as_deref().ok_or(FlowError::NoPdf)?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| FlowError::CorruptPdf(e.to_string()))?;
        Ok(PdfDownload {
            filename: pdf_filename(&self.course.title),
            bytes,
        })
    }
}

/// `<title>.pdf` with whitespace runs replaced by `_`.
pub fn pdf_filename(title: &str) -> String {
    let base = title.split_whitespace().collect::<Vec<_>>().join("_");
    if base.is_empty() {
        "course.pdf".to_string()
    } else {
        format!("{}.pdf", base)
    }
}

/// Clear every hand-off record; the caller navigates to the returned step.
pub fn reset_session<S: SessionStore + ?Sized>(store: &S) -> Step {
    clear_session(store);
    info!("Session reset, returning to landing");
    Step::Landing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{
        save_course_handoff, CourseHandoff, MemoryStore, COURSE_KEY, COURSE_PDF_KEY,
    };

    #[test]
    fn test_example_course_when_nothing_stored() {
        let view = ResultsView::load(&MemoryStore::new());
        assert!(view.is_example);
        assert_eq!(view.course.title, "Introduction to Cognitive Science");
        assert_eq!(view.course.units.len(), 4);
        assert!(!view.can_download());
        assert_eq!(view.pdf_download(), Err(FlowError::NoPdf));
    }

    #[test]
    fn test_corrupt_course_falls_back_to_example() {
        let store = MemoryStore::new();
        store.set(COURSE_KEY, "{{{").unwrap();
        store.set(COURSE_PDF_KEY, "JVBERi0=").unwrap();
        let view = ResultsView::load(&store);
        assert!(view.is_example);
        assert!(!view.can_download());
    }

    #[test]
    fn test_stored_course_with_pdf() {
        let store = MemoryStore::new();
        let mut course = content::example_course();
        course.title = "Cells  and\tGenes".to_string();
        save_course_handoff(
            &store,
            &CourseHandoff {
                course,
                pdf_base64: Some(STANDARD.encode(b"%PDF-1.7 body")),
            },
        )
        .unwrap();

        let view = ResultsView::load(&store);
        assert!(!view.is_example);
        assert!(view.can_download());
        let download = view.pdf_download().unwrap();
        assert_eq!(download.filename, "Cells_and_Genes.pdf");
        assert_eq!(download.bytes, b"%PDF-1.7 body");
    }

    #[test]
    fn test_invalid_base64_is_reported() {
        let store = MemoryStore::new();
        save_course_handoff(
            &store,
            &CourseHandoff {
                course: content::example_course(),
                pdf_base64: Some("not base64!!".into()),
            },
        )
        .unwrap();
        let view = ResultsView::load(&store);
        assert!(matches!(view.pdf_download(), Err(FlowError::CorruptPdf(_))));
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("Introduction to Cognitive Science"), "Introduction_to_Cognitive_Science.pdf");
        assert_eq!(pdf_filename("   "), "course.pdf");
    }
}
