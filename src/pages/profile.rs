use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use personallearn_core::content::{self, DEFAULT_COURSE_TITLE};
use personallearn_core::flow::upload::{self, ProfileView, UploadForm};
use personallearn_core::flow::StepGuard;
use personallearn_core::{PdfUpload, Step};

use crate::api;
use crate::components::pdf_drop_zone::PdfDropZone;
use crate::components::ui::{GlassCard, InfoCardView};
use crate::files::read_file_bytes;
use crate::storage::BrowserStore;
use crate::theme::use_page_theme;

#[component]
pub fn ProfilePage() -> impl IntoView {
    use_page_theme();

    let view_state = ProfileView::load(&BrowserStore);
    let profile = view_state.profile.clone();
    let is_default = view_state.is_default;
    let form = RwSignal::new(UploadForm::new());
    let guard = StepGuard::new();
    on_cleanup({
        let guard = guard.clone();
        move || guard.close()
    });

    let on_file = Callback::new({
        let guard = guard.clone();
        move |file: web_sys::File| {
            let name = file.name();
            let mime = file.type_();
            let Some(ticket) = form
                .try_update(|f| f.offer_file(&name, &mime).ok())
                .flatten()
            else {
                return;
            };

            let guard = guard.clone();
            spawn_local(async move {
                let read = read_file_bytes(&file).await;
                if !guard.is_active() {
                    return;
                }
                if let Err(e) = &read {
                    tracing::warn!("Failed to read '{}': {}", name, e);
                }
                let read = read.map(|bytes| PdfUpload { name, mime, bytes });
                form.update(|f| {
                    f.complete_read(ticket, read);
                });
            });
        }
    });

    let navigate = use_navigate();
    let on_generate = {
        let profile = profile.clone();
        move |_| {
            let Some(request) = form
                .try_update(|f| f.begin_generation(&profile).ok())
                .flatten()
            else {
                return;
            };

            tracing::info!(
                "Generating '{}' ({}, {} units)",
                request.course_title,
                request.level,
                request.units
            );
            let guard = guard.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = upload::generate_course(&api::client(), &BrowserStore, request, &guard).await;
                if !guard.is_active() {
                    return;
                }
                form.update(|f| f.finish_generation(&result));
                match result {
                    Ok(_) => navigate(Step::Results.path(), Default::default()),
                    Err(e) => tracing::warn!("Course generation failed: {}", e),
                }
            });
        }
    };

    let stats = match (view_state.score, view_state.duration_seconds) {
        (Some(score), Some(duration)) => {
            format!("Quiz score {} in {:.0}s", score, duration)
        }
        _ => String::new(),
    };

    view! {
        <div class="page profile-page">
            <section class="profile-summary">
                <p class="eyebrow">{format!("Step {}", Step::Profile.number())}</p>
                <h1>"Your Learning Profile"</h1>
                <p class="muted">
                    {format!("Learning efficiency {:.1}", profile.efficiency)}
                    " "
                    <span class="small">{stats}</span>
                </p>
                <Show when=move || is_default>
                    <p class="notice small">
                        "No quiz result yet, so a balanced default profile is used. "
                        <a href=Step::Quiz.path()>"Take the quiz"</a>
                    </p>
                </Show>
                <div class="card-grid traits">
                    {content::profile_traits(&profile)
                        .into_iter()
                        .map(|card| view! { <InfoCardView card=card class="trait" /> })
                        .collect_view()}
                </div>
            </section>

            <GlassCard class="upload-card">
                <h2>"Build Your Course"</h2>
                <label for="courseTitle" class="small">"Course title"</label>
                <input
                    id="courseTitle"
                    class="text-input"
                    type="text"
                    placeholder=DEFAULT_COURSE_TITLE
                    prop:value=move || form.with(|f| f.title().to_string())
                    on:input=move |ev| form.update(|f| f.set_title(event_target_value(&ev)))
                />
                <PdfDropZone form=form on_file=on_file />
                <button
                    type="button"
                    class="btn primary"
                    class:disabled=move || form.with(|f| f.is_submitting())
                    disabled=move || form.with(|f| f.is_submitting())
                    on:click=on_generate
                >
                    {move || {
                        if form.with(|f| f.is_submitting()) {
                            "Generating..."
                        } else {
                            "Generate Adapted Course"
                        }
                    }}
                </button>
            </GlassCard>
        </div>
    }
}
