use chrono::Utc;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use personallearn_core::flow::quiz::{self, NextOutcome, QuizFlow, QuizPhase};
use personallearn_core::flow::StepGuard;
use personallearn_core::Step;

use crate::api;
use crate::components::ui::GlassCard;
use crate::storage::BrowserStore;
use crate::theme::use_page_theme;

#[component]
pub fn QuizPage() -> impl IntoView {
    use_page_theme();

    let flow = RwSignal::new(QuizFlow::new());
    let phase = Memo::new(move |_| flow.with(|f| f.phase().clone()));
    let guard = StepGuard::new();
    on_cleanup({
        let guard = guard.clone();
        move || guard.close()
    });

    {
        let guard = guard.clone();
        spawn_local(async move {
            match quiz::load_questions(&api::client(), &guard).await {
                Ok(set) => flow.update(|f| f.load(set, Utc::now())),
                Err(e) => tracing::debug!("Quiz questions discarded: {}", e),
            }
        });
    }

    let navigate = use_navigate();
    let on_next = move |_| {
        let outcome = flow
            .try_update(|f| f.go_next(Utc::now()))
            .unwrap_or(NextOutcome::Ignored);
        let NextOutcome::Submit(submission) = outcome else {
            return;
        };

        tracing::info!(
            "Submitting quiz: score {} in {:.1}s",
            submission.score,
            submission.duration_seconds
        );
        let guard = guard.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = quiz::submit_quiz(&api::client(), &BrowserStore, submission, &guard).await;
            if !guard.is_active() {
                return;
            }
            flow.update(|f| f.finish_submission(&result));
            match result {
                Ok(_) => navigate(Step::Profile.path(), Default::default()),
                Err(e) => tracing::warn!("Quiz submission failed: {}", e),
            }
        });
    };

    let not_answering = move || phase.get() != QuizPhase::Answering;
    let ready = move || {
        matches!(
            phase.get(),
            QuizPhase::Answering | QuizPhase::Submitting | QuizPhase::Submitted
        )
    };

    view! {
        <div class="page quiz-page">
            <GlassCard class="quiz-card">
                {move || match phase.get() {
                    QuizPhase::Loading => {
                        view! { <p class="muted">"Loading questions..."</p> }.into_any()
                    }
                    QuizPhase::LoadError(msg) => {
                        view! { <p class="error" role="alert">{msg}</p> }.into_any()
                    }
                    _ => question_view(flow).into_any(),
                }}

                <div class="quiz-actions" class:hidden=move || !ready()>
                    <button
                        type="button"
                        class="btn ghost"
                        disabled=move || not_answering() || flow.with(|f| f.index() == 0)
                        on:click=move |_| {
                            flow.update(|f| {
                                f.go_previous();
                            });
                        }
                    >
                        "Previous"
                    </button>
                    <button
                        type="button"
                        class="btn primary"
                        disabled=not_answering
                        on:click=on_next
                    >
                        {move || {
                            flow.with(|f| {
                                if f.is_submitting() {
                                    "Submitting..."
                                } else if f.is_last() {
                                    "Finish"
                                } else {
                                    "Next"
                                }
                            })
                        }}
                    </button>
                </div>
            </GlassCard>
        </div>
    }
}

fn question_view(flow: RwSignal<QuizFlow>) -> impl IntoView {
    let header = move || {
        flow.with(|f| {
            format!(
                "Step {} · Question {} of {}",
                Step::Quiz.number(),
                f.index() + 1,
                f.len()
            )
        })
    };
    let answered = move || flow.with(|f| format!("{} of {} answered", f.answered_count(), f.len()));
    let progress = move || flow.with(|f| format!("{:.0}%", f.progress() * 100.0));
    let prompt = move || {
        flow.with(|f| {
            f.current_question()
                .map(|q| q.prompt.clone())
                .unwrap_or_default()
        })
    };

    let options = move || {
        let (index, options, selected) = flow.with(|f| {
            (
                f.index(),
                f.current_question()
                    .map(|q| q.options.clone())
                    .unwrap_or_default(),
                f.selected(f.index()).map(str::to_string),
            )
        });
        options
            .into_iter()
            .map(|option| {
                let is_selected = selected.as_deref() == Some(option.as_str());
                let value = option.clone();
                view! {
                    <button
                        type="button"
                        class="option"
                        class:selected=is_selected
                        aria-pressed=is_selected.to_string()
                        disabled=move || flow.with(|f| f.is_submitting())
                        on:click=move |_| {
                            flow.update(|f| {
                                f.select_option(index, &value);
                            });
                        }
                    >
                        {option}
                    </button>
                }
            })
            .collect_view()
    };

    let dots = move || {
        let (current, answered): (usize, Vec<bool>) = flow.with(|f| {
            (f.index(), f.answers().iter().map(Option::is_some).collect())
        });
        answered
            .into_iter()
            .enumerate()
            .map(|(i, is_answered)| {
                view! {
                    <button
                        type="button"
                        class="dot"
                        class:active=i == current
                        class:answered=is_answered
                        aria-label=format!("Go to question {}", i + 1)
                        on:click=move |_| {
                            flow.update(|f| {
                                f.jump_to(i);
                            });
                        }
                    ></button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="quiz-header">
            <p class="eyebrow">{header}</p>
            <span class="muted small">{answered}</span>
        </div>
        <div class="progress">
            <div class="progress-fill" style:width=progress></div>
        </div>
        <h2 class="quiz-prompt">{prompt}</h2>
        <div class="options">{options}</div>
        <div class="dots">{dots}</div>
        <Show when=move || flow.with(|f| f.is_fallback())>
            <p class="notice small">
                "The question service is unavailable, so a practice set is shown. "
                "Practice answers are not scored."
            </p>
        </Show>
        {move || {
            flow.with(|f| f.error().map(str::to_string))
                .map(|msg| view! { <p class="error" role="alert">{msg}</p> })
        }}
    }
}
