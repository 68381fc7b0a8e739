//! Profile step: effective profile, PDF selection and course generation.

use tracing::{debug, info, warn};

use super::StepGuard;
use crate::api::LearningApi;
use crate::content::{self, DEFAULT_COURSE_TITLE};
use crate::error::FlowError;
use crate::model::{CourseRequest, PdfUpload, Profile};
use crate::session::{load_quiz_handoff, save_course_handoff, CourseHandoff, SessionStore};

pub const PDF_MIME: &str = "application/pdf";

/// Accepts by MIME type or by `.pdf` suffix; browsers often leave the type empty.
pub fn is_pdf(name: &str, mime: &str) -> bool {
    mime.eq_ignore_ascii_case(PDF_MIME) || name.to_ascii_lowercase().ends_with(".pdf")
}

pub fn course_title_or_default(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_COURSE_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The profile the upload step works with.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub profile: Profile,
    pub score: Option<u32>,
    pub duration_seconds: Option<f64>,
    /// No quiz result was found, so the bundled default is shown.
    pub is_default: bool,
}

impl ProfileView {
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Self {
        match load_quiz_handoff(store) {
            Some(handoff) => Self {
                profile: handoff.profile,
                score: Some(handoff.score),
                duration_seconds: Some(handoff.duration_seconds),
                is_default: false,
            },
            None => Self {
                profile: content::default_profile(),
                score: None,
                duration_seconds: None,
                is_default: true,
            },
        }
    }
}

/// Transient state of the upload form.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    title: String,
    file: Option<PdfUpload>,
    error: Option<String>,
    dragging: bool,
    submitting: bool,
    /// Bumped on every pick; reads finishing under an older value are stale.
    selection: u64,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_COURSE_TITLE.to_string(),
            file: None,
            error: None,
            dragging: false,
            submitting: false,
            selection: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn file(&self) -> Option<&PdfUpload> {
        self.file.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// First check on a picked file, before its bytes are read. Returns the
    /// ticket the read must present to [`UploadForm::complete_read`]. Any
    /// pick, accepted or not, invalidates reads still in flight; a rejected
    /// file also drops whatever was selected before.
    pub fn offer_file(&mut self, name: &str, mime: &str) -> Result<u64, FlowError> {
        self.dragging = false;
        self.selection += 1;
        if is_pdf(name, mime) {
            return Ok(self.selection);
        }
        warn!("Rejected non-PDF upload '{}' ({})", name, mime);
        self.file = None;
        self.error = Some(FlowError::NotPdf.to_string());
        Err(FlowError::NotPdf)
    }

    /// Apply a finished read. Returns `false` when a newer pick superseded it.
    pub fn complete_read(&mut self, ticket: u64, read: Result<PdfUpload, String>) -> bool {
        if ticket != self.selection {
            debug!("Discarding stale file read (ticket {}, current {})", ticket, self.selection);
            return false;
        }
        match read {
            Ok(upload) => {
                info!("Selected PDF '{}' ({} bytes)", upload.name, upload.bytes.len());
                self.file = Some(upload);
                self.error = None;
            }
            Err(reason) => {
                self.file = None;
                self.error = Some(format!("Could not read the selected file: {}", reason));
            }
        }
        true
    }

    /// Offer and complete in one go, for bytes already in memory.
    pub fn accept_file(&mut self, upload: PdfUpload) -> Result<(), FlowError> {
        let ticket = self.offer_file(&upload.name, &upload.mime)?;
        self.complete_read(ticket, Ok(upload));
        Ok(())
    }

    /// Build the request and mark the form busy. Without a file the error is
    /// shown and nothing is sent; a second call while busy does nothing.
    pub fn begin_generation(&mut self, profile: &Profile) -> Result<CourseRequest, FlowError> {
        if self.submitting {
            return Err(FlowError::Busy);
        }
        let Some(file) = self.file.clone() else {
            self.error = Some(FlowError::MissingFile.to_string());
            return Err(FlowError::MissingFile);
        };

        self.submitting = true;
        self.error = None;
        Ok(CourseRequest {
            course_title: course_title_or_default(&self.title),
            level: profile.level.clone(),
            units: profile.units,
            file,
        })
    }

    /// Title and file survive a failure so the user can retry.
    pub fn finish_generation<T>(&mut self, result: &Result<T, FlowError>) {
        self.submitting = false;
        match result {
            Ok(_) | Err(FlowError::Cancelled) | Err(FlowError::Busy) => {}
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Request the course, then store it for the results step.
pub async fn generate_course<A, S>(
    api: &A,
    store: &S,
    request: CourseRequest,
    guard: &StepGuard,
) -> Result<CourseHandoff, FlowError>
where
    A: LearningApi + ?Sized,
    S: SessionStore + ?Sized,
{
    let generated = api.submit_course_request(request).await?;

    if !guard.is_active() {
        info!("Profile step closed before the course arrived; discarding result");
        return Err(FlowError::Cancelled);
    }

    let handoff = CourseHandoff::from(generated);
    save_course_handoff(store, &handoff)?;
    Ok(handoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::session::{save_quiz_handoff, MemoryStore, QuizHandoff, QUIZ_RESULT_KEY};

    fn pdf(name: &str) -> PdfUpload {
        PdfUpload {
            name: name.to_string(),
            mime: PDF_MIME.to_string(),
            bytes: b"%PDF-1.4 test".to_vec(),
        }
    }

    #[test]
    fn test_pdf_detection() {
        assert!(is_pdf("notes.pdf", ""));
        assert!(is_pdf("NOTES.PDF", "application/octet-stream"));
        assert!(is_pdf("download", "application/pdf"));
        assert!(!is_pdf("notes.docx", "application/msword"));
        assert!(!is_pdf("pdf.txt", "text/plain"));
    }

    #[test]
    fn test_title_defaults_when_blank() {
        assert_eq!(course_title_or_default("   "), DEFAULT_COURSE_TITLE);
        assert_eq!(course_title_or_default("  Biology 101 "), "Biology 101");
    }

    #[test]
    fn test_rejected_file_clears_selection() {
        let mut form = UploadForm::new();
        form.accept_file(pdf("chapter.pdf")).unwrap();
        assert_eq!(form.file_name(), Some("chapter.pdf"));

        assert_eq!(form.offer_file("photo.png", "image/png"), Err(FlowError::NotPdf));
        assert!(form.file().is_none());
        assert_eq!(form.error(), Some("Only PDF files are supported."));

        form.accept_file(pdf("other.pdf")).unwrap();
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_latest_pick_wins_over_slower_read() {
        let mut form = UploadForm::new();
        let large = form.offer_file("large.pdf", PDF_MIME).unwrap();
        let small = form.offer_file("small.pdf", PDF_MIME).unwrap();

        assert!(form.complete_read(small, Ok(pdf("small.pdf"))));
        assert!(!form.complete_read(large, Ok(pdf("large.pdf"))));
        assert_eq!(form.file_name(), Some("small.pdf"));
    }

    #[test]
    fn test_rejection_invalidates_pending_read() {
        let mut form = UploadForm::new();
        let pending = form.offer_file("slides.pdf", PDF_MIME).unwrap();
        form.offer_file("photo.png", "image/png").unwrap_err();

        assert!(!form.complete_read(pending, Ok(pdf("slides.pdf"))));
        assert!(form.file().is_none());
        assert_eq!(form.error(), Some("Only PDF files are supported."));
    }

    #[test]
    fn test_unreadable_file_clears_selection() {
        let mut form = UploadForm::new();
        form.accept_file(pdf("first.pdf")).unwrap();
        let ticket = form.offer_file("second.pdf", PDF_MIME).unwrap();
        assert!(form.complete_read(ticket, Err("permission denied".into())));
        assert!(form.file().is_none());
        assert!(form.error().unwrap().contains("permission denied"));
    }

    #[test]
    fn test_missing_file_blocks_generation() {
        let mut form = UploadForm::new();
        let result = form.begin_generation(&content::default_profile());
        assert_eq!(result, Err(FlowError::MissingFile));
        assert_eq!(form.error(), Some("Please upload a PDF to continue."));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_request_uses_profile_and_trimmed_title() {
        let mut form = UploadForm::new();
        form.set_title("  Neuro Basics ");
        form.accept_file(pdf("neuro.pdf")).unwrap();
        let profile = Profile {
            level: "Beginner".into(),
            units: 10,
            desc: "Micro-Learning".into(),
            efficiency: 1.2,
        };
        let request = form.begin_generation(&profile).unwrap();
        assert_eq!(request.course_title, "Neuro Basics");
        assert_eq!(request.level, "Beginner");
        assert_eq!(request.units, 10);
        assert_eq!(request.file.name, "neuro.pdf");
        assert!(form.is_submitting());

        assert_eq!(form.begin_generation(&profile), Err(FlowError::Busy));
    }

    #[test]
    fn test_failure_keeps_form_intact() {
        let mut form = UploadForm::new();
        form.set_title("Keep me");
        form.accept_file(pdf("keep.pdf")).unwrap();
        form.begin_generation(&content::default_profile()).unwrap();

        form.finish_generation(&Err::<(), _>(FlowError::Api(ApiError::Timeout)));
        assert!(!form.is_submitting());
        assert_eq!(form.title(), "Keep me");
        assert_eq!(form.file_name(), Some("keep.pdf"));
        assert!(form.error().unwrap().contains("too long"));
    }

    #[test]
    fn test_profile_view_defaults_without_handoff() {
        let store = MemoryStore::new();
        let view = ProfileView::load(&store);
        assert!(view.is_default);
        assert_eq!(view.profile, content::default_profile());
        assert_eq!(view.profile.efficiency, 0.0);

        store.set(QUIZ_RESULT_KEY, "[]").unwrap();
        assert!(ProfileView::load(&store).is_default);
    }

    #[test]
    fn test_profile_view_reads_handoff() {
        let store = MemoryStore::new();
        let profile = Profile {
            level: "Advanced".into(),
            units: 4,
            desc: "High Density".into(),
            efficiency: 15.0,
        };
        save_quiz_handoff(
            &store,
            &QuizHandoff {
                profile: profile.clone(),
                score: 3,
                duration_seconds: 19.0,
            },
        )
        .unwrap();
        let view = ProfileView::load(&store);
        assert!(!view.is_default);
        assert_eq!(view.profile, profile);
        assert_eq!(view.score, Some(3));
    }
}
