use leptos::prelude::*;

use personallearn_core::Theme;

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: ReadSignal<Theme>,
    pub set_theme: WriteSignal<Theme>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        self.set_theme.update(|t| *t = t.toggled());
    }
}

/// Set `data-theme` on `<html>` so the stylesheet can switch palettes.
pub fn apply_theme(theme: Theme) {
    if let Some(window) = web_sys::window() {
        if let Some(doc) = window.document() {
            if let Some(html) = doc.document_element() {
                let _ = html.set_attribute("data-theme", theme.as_str());
            }
        }
    }
}

/// Every page starts in the default theme; the toggle is not remembered.
pub fn use_page_theme() -> ThemeContext {
    let ctx = expect_context::<ThemeContext>();
    ctx.set_theme.set(Theme::default());
    ctx
}
