use leptos::prelude::*;
use leptos_router::hooks::use_location;

use personallearn_core::Step;

use crate::theme::ThemeContext;

#[component]
pub fn TopBar() -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let location = use_location();
    let theme = expect_context::<ThemeContext>();

    // Close the mobile menu after every navigation
    Effect::new(move |_| {
        location.pathname.track();
        set_menu_open.set(false);
    });

    view! {
        <header class="topbar glass">
            <div class="brand">
                <span class="brand-mark">
                    <img src="/android-chrome-512x512.png" alt="PersonalLearn" class="brand-logo" />
                </span>
                <div>
                    <p class="eyebrow">"PersonalLearn"</p>
                </div>
            </div>
            <div class="top-actions">
                <button
                    type="button"
                    class="menu-toggle"
                    aria-controls="primary-nav"
                    aria-expanded=move || menu_open.get().to_string()
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    <span class="sr-only">"Toggle navigation"</span>
                    <span class="menu-icon" aria-hidden="true">
                        <span />
                        <span />
                        <span />
                    </span>
                    <span class="menu-label">"Menu"</span>
                </button>
                <nav id="primary-nav" class="nav-links" class:open=move || menu_open.get()>
                    {Step::ALL
                        .into_iter()
                        .map(|step| {
                            view! {
                                <a
                                    href=step.path()
                                    class="nav-link"
                                    class:active=move || location.pathname.with(|p| step.is_active(p))
                                >
                                    {step.nav_label()}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
                <span class="pill">"Beta"</span>
            </div>
        </header>
        <div class="top-actions theme-toggle">
            <button type="button" class="toggle" on:click=move |_| theme.toggle()>
                {move || theme.theme.get().toggle_label()}
            </button>
        </div>
    }
}
