use leptos::prelude::*;

use personallearn_core::content;
use personallearn_core::Step;

use crate::components::ui::{GradientButton, InfoCardView};
use crate::theme::use_page_theme;

#[component]
pub fn LandingPage() -> impl IntoView {
    use_page_theme();

    view! {
        <div class="page landing-page">
            <section class="hero">
                <p class="eyebrow">"Adaptive AI Course Builder"</p>
                <h1>"Unlock Your Learning Potential"</h1>
                <p class="lede">
                    "Take a short cognitive calibration, then turn any PDF into a course "
                    "paced for the way you learn."
                </p>
                <GradientButton href=Step::Quiz.path().to_string()>
                    "Start Cognitive Calibration"
                </GradientButton>
            </section>

            <section class="card-grid features">
                {content::features()
                    .into_iter()
                    .map(|card| view! { <InfoCardView card=card class="feature" /> })
                    .collect_view()}
            </section>
        </div>
    }
}
