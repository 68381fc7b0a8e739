//! Card and button primitives shared by every page.

use leptos::prelude::*;

use personallearn_core::content::InfoCard;

#[component]
pub fn GlassCard(
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("glass {}", class)>{children()}</div>
    }
}

/// Primary (or ghost) call-to-action. Renders a link when `href` is given.
#[component]
pub fn GradientButton(
    children: Children,
    #[prop(optional)] ghost: bool,
    #[prop(optional, into)] href: Option<String>,
    #[prop(optional)] on_click: Option<Callback<()>>,
    #[prop(optional, into)] disabled: Option<Signal<bool>>,
) -> impl IntoView {
    let is_disabled = move || disabled.map(|d| d.get()).unwrap_or(false);
    let class = move || {
        format!(
            "btn {} {}",
            if ghost { "ghost" } else { "primary" },
            if is_disabled() { "disabled" } else { "" }
        )
    };

    match href {
        Some(href) => view! {
            <a
                href=href
                class=move || format!("{} link-btn", class())
                aria-disabled=move || is_disabled().to_string()
            >
                {children()}
            </a>
        }
        .into_any(),
        None => view! {
            <button
                type="button"
                class=class
                disabled=is_disabled
                on:click=move |_| {
                    if let Some(cb) = on_click {
                        cb.run(());
                    }
                }
            >
                {children()}
            </button>
        }
        .into_any(),
    }
}

/// Icon, title and blurb inside a glass card.
#[component]
pub fn InfoCardView(card: InfoCard, #[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <GlassCard class=class>
            <div class="icon">{card.icon}</div>
            <div>
                <p class="card-title">{card.title}</p>
                <p class="muted">{card.description}</p>
            </div>
        </GlassCard>
    }
}
