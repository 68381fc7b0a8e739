//! PDF picker with drag-and-drop and a keyboard-accessible browse dialog.

use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use personallearn_core::flow::upload::{UploadForm, PDF_MIME};

#[component]
pub fn PdfDropZone(
    form: RwSignal<UploadForm>,
    /// Called with the first file of a drop or browse selection
    on_file: Callback<web_sys::File>,
) -> impl IntoView {
    let file_input = NodeRef::<Input>::new();

    let open_browser = move || {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        form.update(|f| f.set_dragging(false));

        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            on_file.run(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file.run(file);
        }
        // Let the same file be picked again after a rejection
        input.set_value("");
    };

    view! {
        <div
            class="upload-drop"
            class:dragging=move || form.with(|f| f.is_dragging())
            role="button"
            tabindex="0"
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                form.update(|f| f.set_dragging(true));
            }
            on:dragenter=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                form.update(|f| f.set_dragging(true));
            }
            on:dragleave=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                form.update(|f| f.set_dragging(false));
            }
            on:drop=on_drop
            on:click=move |_| open_browser()
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                let key = ev.key();
                if key == "Enter" || key == " " {
                    ev.prevent_default();
                    open_browser();
                }
            }
        >
            <input
                node_ref=file_input
                type="file"
                accept=PDF_MIME
                class="sr-only"
                on:change=on_input_change
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
            />
            <div class="icon">"PDF"</div>
            <p class="muted">"Drag and drop your PDF here or click to browse"</p>
            <div class="upload-meta">
                {move || match form.with(|f| f.file_name().map(str::to_string)) {
                    Some(name) => view! {
                        <span class="badge">"Selected"</span>
                        <span>{name}</span>
                    }
                    .into_any(),
                    None => view! { <span class="muted small">"No file selected yet"</span> }.into_any(),
                }}
            </div>
            {move || {
                form.with(|f| f.error().map(str::to_string))
                    .map(|msg| view! { <p class="upload-error small" role="alert">{msg}</p> })
            }}
        </div>
    }
}
