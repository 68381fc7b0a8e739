//! Quiz step: question navigation, answer tracking and the single submission.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::StepGuard;
use crate::api::{LearningApi, QuestionSet};
use crate::error::FlowError;
use crate::model::QuizQuestion;
use crate::session::{save_quiz_handoff, QuizHandoff, SessionStore};

#[derive(Debug, Clone, PartialEq)]
pub enum QuizPhase {
    /// Waiting for questions.
    Loading,
    /// No usable questions arrived.
    LoadError(String),
    Answering,
    /// A profile request is in flight.
    Submitting,
    /// Result stored, navigation pending.
    Submitted,
}

/// Score and elapsed time sent to `POST /profile`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSubmission {
    pub score: u32,
    pub duration_seconds: f64,
}

/// What `go_next` did.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Advanced(usize),
    Submit(QuizSubmission),
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizFlow {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<String>>,
    index: usize,
    phase: QuizPhase,
    started_at: Option<DateTime<Utc>>,
    from_fallback: bool,
    error: Option<String>,
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizFlow {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            answers: Vec::new(),
            index: 0,
            phase: QuizPhase::Loading,
            started_at: None,
            from_fallback: false,
            error: None,
        }
    }

    /// Install a question set and start the clock.
    pub fn load(&mut self, set: QuestionSet, now: DateTime<Utc>) {
        self.from_fallback = set.is_fallback();
        self.questions = set.into_questions();
        self.answers = vec![None; self.questions.len()];
        self.index = 0;
        self.error = None;

        if self.questions.is_empty() {
            self.phase = QuizPhase::LoadError("No quiz questions are available right now.".to_string());
            self.started_at = None;
        } else {
            self.phase = QuizPhase::Answering;
            self.started_at = Some(now);
            info!(
                "Quiz started with {} questions (fallback: {})",
                self.questions.len(),
                self.from_fallback
            );
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.index)
    }

    pub fn selected(&self, i: usize) -> Option<&str> {
        self.answers.get(i).and_then(|a| a.as_deref())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.index + 1 == self.questions.len()
    }

    pub fn is_fallback(&self) -> bool {
        self.from_fallback
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == QuizPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Position through the quiz in `(0, 1]`, 0 when nothing is loaded.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            (self.index + 1) as f64 / self.questions.len() as f64
        }
    }

    /// Record `option` for question `i`. Never moves the cursor.
    pub fn select_option(&mut self, i: usize, option: &str) -> bool {
        if self.phase != QuizPhase::Answering {
            return false;
        }
        let Some(question) = self.questions.get(i) else {
            return false;
        };
        if !question.has_option(option) {
            debug!("Ignoring unknown option '{}' for question {}", option, i);
            return false;
        }
        self.answers[i] = Some(option.to_string());
        self.error = None;
        true
    }

    /// Advance one question, or begin submission on the last one.
    pub fn go_next(&mut self, now: DateTime<Utc>) -> NextOutcome {
        if self.phase != QuizPhase::Answering {
            return NextOutcome::Ignored;
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            NextOutcome::Advanced(self.index)
        } else {
            match self.begin_submission(now) {
                Some(submission) => NextOutcome::Submit(submission),
                None => NextOutcome::Ignored,
            }
        }
    }

    pub fn go_previous(&mut self) -> usize {
        if self.phase == QuizPhase::Answering {
            self.index = self.index.saturating_sub(1);
        }
        self.index
    }

    /// Move straight to question `i`; earlier questions may be unanswered.
    pub fn jump_to(&mut self, i: usize) -> bool {
        if self.phase != QuizPhase::Answering || i >= self.questions.len() {
            return false;
        }
        self.index = i;
        true
    }

    /// Answers matching the question's correct value. Questions without a
    /// known answer (the bundled set) never count.
    pub fn score(&self) -> u32 {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| a.as_deref().is_some_and(|a| q.is_correct(a)))
            .count() as u32
    }

    /// Seconds since the quiz was loaded, never negative.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        match self.started_at {
            Some(start) => ((now - start).num_milliseconds() as f64 / 1000.0).max(0.0),
            None => 0.0,
        }
    }

    /// Enter `Submitting`. Returns `None` when a submission is already in
    /// flight or there is nothing to submit.
    pub fn begin_submission(&mut self, now: DateTime<Utc>) -> Option<QuizSubmission> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        self.phase = QuizPhase::Submitting;
        self.error = None;
        Some(QuizSubmission {
            score: self.score(),
            duration_seconds: self.elapsed_seconds(now),
        })
    }

    /// Leave `Submitting`. Failures return to answering at the same index
    /// with every answer kept.
    pub fn finish_submission<T>(&mut self, result: &Result<T, FlowError>) {
        if self.phase != QuizPhase::Submitting {
            return;
        }
        match result {
            Ok(_) => self.phase = QuizPhase::Submitted,
            Err(FlowError::Cancelled) => self.phase = QuizPhase::Answering,
            Err(e) => {
                self.phase = QuizPhase::Answering;
                self.error = Some(e.to_string());
            }
        }
    }
}

/// Fetch questions for a freshly mounted quiz step.
pub async fn load_questions<A>(api: &A, guard: &StepGuard) -> Result<QuestionSet, FlowError>
where
    A: LearningApi + ?Sized,
{
    let set = api.fetch_quiz_questions().await;
    if !guard.is_active() {
        return Err(FlowError::Cancelled);
    }
    Ok(set)
}

/// Send the result, then store the hand-off record for the profile step.
pub async fn submit_quiz<A, S>(
    api: &A,
    store: &S,
    submission: QuizSubmission,
    guard: &StepGuard,
) -> Result<QuizHandoff, FlowError>
where
    A: LearningApi + ?Sized,
    S: SessionStore + ?Sized,
{
    let profile = api
        .submit_quiz_profile(submission.score, submission.duration_seconds)
        .await?;

    if !guard.is_active() {
        info!("Quiz step closed before the profile arrived; discarding result");
        return Err(FlowError::Cancelled);
    }

    let handoff = QuizHandoff {
        profile,
        score: submission.score,
        duration_seconds: submission.duration_seconds,
    };
    save_quiz_handoff(store, &handoff)?;
    Ok(handoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::error::ApiError;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn loaded_flow() -> QuizFlow {
        let mut flow = QuizFlow::new();
        flow.load(
            QuestionSet::Loaded(vec![
                QuizQuestion::new("2,4,8,16,?", &["18", "24", "30", "32"], Some("32")),
                QuizQuestion::new("Neuron : brain :: pixel : ?", &["Monitor", "Image"], Some("Image")),
                QuizQuestion::new("Best habit?", &["Cramming", "Spaced reviews"], Some("Spaced reviews")),
            ]),
            t0(),
        );
        flow
    }

    #[test]
    fn test_load_initialises_one_slot_per_question() {
        let flow = loaded_flow();
        assert_eq!(flow.phase(), &QuizPhase::Answering);
        assert_eq!(flow.answers().len(), 3);
        assert!(flow.answers().iter().all(Option::is_none));
        assert_eq!(flow.index(), 0);
    }

    #[test]
    fn test_empty_set_is_load_error() {
        let mut flow = QuizFlow::new();
        flow.load(QuestionSet::Loaded(vec![]), t0());
        assert!(matches!(flow.phase(), QuizPhase::LoadError(_)));
        assert_eq!(flow.go_next(t0()), NextOutcome::Ignored);
        assert!(!flow.jump_to(0));
    }

    #[test]
    fn test_select_changes_only_that_slot() {
        let mut flow = loaded_flow();
        assert!(flow.select_option(1, "Image"));
        assert_eq!(flow.answers(), &[None, Some("Image".to_string()), None]);
        assert_eq!(flow.index(), 0, "selecting must not advance");

        assert!(flow.select_option(1, "Image"));
        assert_eq!(flow.answered_count(), 1);

        assert!(flow.select_option(1, "Monitor"));
        assert_eq!(flow.selected(1), Some("Monitor"));
        assert_eq!(flow.selected(0), None);
    }

    #[test]
    fn test_select_rejects_bad_input() {
        let mut flow = loaded_flow();
        assert!(!flow.select_option(7, "32"));
        assert!(!flow.select_option(0, "33"));
        assert_eq!(flow.answered_count(), 0);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut flow = loaded_flow();
        assert_eq!(flow.go_previous(), 0);
        assert_eq!(flow.go_next(t0()), NextOutcome::Advanced(1));
        assert_eq!(flow.go_next(t0()), NextOutcome::Advanced(2));
        assert!(flow.is_last());
        assert!(!flow.jump_to(3));
        assert_eq!(flow.index(), 2);
        assert!(flow.jump_to(0));
        assert_eq!(flow.go_previous(), 0);
        assert!(flow.jump_to(2));
        assert_eq!(flow.go_previous(), 1);
    }

    #[test]
    fn test_jump_does_not_require_prior_answers() {
        let mut flow = loaded_flow();
        assert!(flow.jump_to(2));
        assert!(flow.select_option(2, "Spaced reviews"));
        assert_eq!(flow.answered_count(), 1);
    }

    #[test]
    fn test_score_counts_matching_answers() {
        let mut flow = loaded_flow();
        assert_eq!(flow.score(), 0);
        flow.select_option(0, "32");
        flow.select_option(1, "Monitor");
        flow.select_option(2, "Spaced reviews");
        assert_eq!(flow.score(), 2);
        assert!(flow.score() as usize <= flow.len());
    }

    #[test]
    fn test_fallback_questions_always_score_zero() {
        let mut flow = QuizFlow::new();
        flow.load(QuestionSet::Fallback(content::fallback_questions()), t0());
        assert!(flow.is_fallback());
        flow.select_option(0, "32");
        assert_eq!(flow.score(), 0);
    }

    #[test]
    fn test_last_next_begins_submission_once() {
        let mut flow = loaded_flow();
        flow.select_option(0, "32");
        flow.jump_to(2);

        let outcome = flow.go_next(t0() + Duration::milliseconds(42_500));
        assert_eq!(
            outcome,
            NextOutcome::Submit(QuizSubmission {
                score: 1,
                duration_seconds: 42.5
            })
        );
        assert!(flow.is_submitting());

        assert_eq!(flow.go_next(t0()), NextOutcome::Ignored);
        assert!(flow.begin_submission(t0()).is_none());
        assert!(!flow.select_option(0, "18"), "answers are frozen while submitting");
    }

    #[test]
    fn test_clock_skew_never_gives_negative_duration() {
        let flow = loaded_flow();
        assert_eq!(flow.elapsed_seconds(t0() - Duration::seconds(5)), 0.0);
    }

    #[test]
    fn test_failed_submission_keeps_answers_and_index() {
        let mut flow = loaded_flow();
        flow.select_option(0, "32");
        flow.select_option(2, "Cramming");
        flow.jump_to(2);
        let before = flow.answers().to_vec();
        flow.go_next(t0());

        let failure: Result<(), FlowError> = Err(FlowError::Api(ApiError::Rejected {
            status: 500,
            detail: "profile service down".into(),
        }));
        flow.finish_submission(&failure);

        assert_eq!(flow.phase(), &QuizPhase::Answering);
        assert_eq!(flow.index(), 2);
        assert_eq!(flow.answers(), before.as_slice());
        assert_eq!(flow.error(), Some("profile service down"));

        // Retry works and clears the message.
        assert!(matches!(flow.go_next(t0()), NextOutcome::Submit(_)));
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_successful_submission_finishes() {
        let mut flow = loaded_flow();
        flow.jump_to(2);
        flow.go_next(t0());
        flow.finish_submission(&Ok::<(), FlowError>(()));
        assert_eq!(flow.phase(), &QuizPhase::Submitted);
        assert_eq!(flow.go_next(t0()), NextOutcome::Ignored);
    }

    #[test]
    fn test_cancelled_submission_is_silent() {
        let mut flow = loaded_flow();
        flow.jump_to(2);
        flow.go_next(t0());
        flow.finish_submission(&Err::<(), _>(FlowError::Cancelled));
        assert_eq!(flow.phase(), &QuizPhase::Answering);
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_progress() {
        let mut flow = loaded_flow();
        assert!((flow.progress() - 1.0 / 3.0).abs() < 1e-9);
        flow.jump_to(2);
        assert_eq!(flow.progress(), 1.0);
        assert_eq!(QuizFlow::new().progress(), 0.0);
    }
}
