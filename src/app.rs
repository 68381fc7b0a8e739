use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use personallearn_core::Theme;

use crate::components::top_bar::TopBar;
use crate::pages::landing::LandingPage;
use crate::pages::profile::ProfilePage;
use crate::pages::quiz::QuizPage;
use crate::pages::results::ResultsPage;
use crate::theme::{apply_theme, ThemeContext};

#[component]
pub fn App() -> impl IntoView {
    let (theme, set_theme) = signal(Theme::default());
    provide_context(ThemeContext { theme, set_theme });

    // Apply theme to DOM whenever the signal changes
    Effect::new(move |_| {
        apply_theme(theme.get());
    });

    view! {
        <Router>
            <div class="page-shell">
                <div class="nebula nebula-a" />
                <div class="nebula nebula-b" />
                <div class="nebula nebula-c" />
                <TopBar />
                <main class="content">
                    <Routes fallback=|| view! { <p class="muted">"Page not found"</p> }>
                        <Route path=path!("/") view=LandingPage />
                        <Route path=path!("/quiz") view=QuizPage />
                        <Route path=path!("/profile") view=ProfilePage />
                        <Route path=path!("/results") view=ResultsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
