mod api;
mod app;
mod components;
mod files;
mod logging;
mod pages;
mod storage;
mod theme;

use app::App;

fn main() {
    let config = api::config();
    logging::init(&config.log_level);
    tracing::info!("Starting PersonalLearn (API base: {})", config.api_base);

    leptos::mount::mount_to_body(App);
}
