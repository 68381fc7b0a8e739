use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use personallearn_core::flow::results::{reset_session, ResultsView};
use personallearn_core::model::{Unit, UnitQuizQuestion};
use personallearn_core::Step;

use crate::components::ui::{GlassCard, GradientButton};
use crate::files;
use crate::storage::BrowserStore;
use crate::theme::use_page_theme;

#[component]
pub fn ResultsPage() -> impl IntoView {
    use_page_theme();

    let results = ResultsView::load(&BrowserStore);
    let can_download = results.can_download();
    let is_example = results.is_example;
    let course = results.course.clone();
    let download_error = RwSignal::new(None::<String>);

    let on_download = Callback::new(move |_: ()| match results.pdf_download() {
        Ok(download) => match files::save_pdf(&download) {
            Ok(()) => download_error.set(None),
            Err(e) => {
                tracing::warn!("PDF download failed: {}", e);
                download_error.set(Some(e));
            }
        },
        Err(e) => download_error.set(Some(e.to_string())),
    });

    let navigate = use_navigate();
    let on_reset = move |_| {
        let step = reset_session(&BrowserStore);
        navigate(step.path(), Default::default());
    };

    let level = course.level.clone().unwrap_or_else(|| "Adaptive".to_string());

    view! {
        <div class="page results-page">
            <section class="results-header">
                <p class="eyebrow">{format!("Step {} · {} Level", Step::Results.number(), level)}</p>
                <h1>{course.title.clone()}</h1>
                {course.description.clone().map(|d| view! { <p class="lede">{d}</p> })}
                <Show when=move || is_example>
                    <p class="notice small">
                        "No generated course was found, so an example course is shown."
                    </p>
                </Show>
                <div class="results-actions">
                    <GradientButton on_click=on_download disabled=Signal::stored(!can_download)>
                        "Download PDF"
                    </GradientButton>
                    <button type="button" class="btn ghost" on:click=on_reset>
                        "Start New Session"
                    </button>
                </div>
                {move || {
                    download_error
                        .get()
                        .map(|msg| view! { <p class="error" role="alert">{msg}</p> })
                }}
            </section>

            <section class="units">
                {course
                    .units
                    .into_iter()
                    .enumerate()
                    .map(|(i, unit)| view! { <UnitCard number=i + 1 unit=unit /> })
                    .collect_view()}
            </section>
        </div>
    }
}

#[component]
fn UnitCard(number: usize, unit: Unit) -> impl IntoView {
    let icon = unit.icon.unwrap_or_else(|| "📘".to_string());

    view! {
        <GlassCard class="unit-card">
            <div class="unit-head">
                <span class="icon">{icon}</span>
                <div>
                    <p class="muted small">{format!("Unit {}", number)}</p>
                    <h3>{unit.title}</h3>
                </div>
            </div>
            <p class="unit-content">{unit.content}</p>
            <div class="badges">
                {unit
                    .objectives
                    .into_iter()
                    .map(|objective| view! { <span class="badge">{objective}</span> })
                    .collect_view()}
            </div>
            {(!unit.quiz_questions.is_empty())
                .then(|| {
                    view! {
                        <div class="self-check">
                            <p class="small">"Self-check"</p>
                            {unit.quiz_questions.into_iter().map(self_check).collect_view()}
                        </div>
                    }
                })}
        </GlassCard>
    }
}

fn self_check(question: UnitQuizQuestion) -> impl IntoView {
    let answer = question.correct_answer().map(str::to_string);

    view! {
        <details class="check">
            <summary>{question.question}</summary>
            <ol class="choices">
                {question
                    .choices
                    .into_iter()
                    .map(|choice| view! { <li>{choice}</li> })
                    .collect_view()}
            </ol>
            {answer.map(|a| view! { <p class="small">"Answer: " {a}</p> })}
            {question.explanation.map(|e| view! { <p class="muted small">{e}</p> })}
        </details>
    }
}
