//! Process-wide configuration and backend client.

use personallearn_core::{ApiClient, AppConfig};

thread_local! {
    static CONFIG: AppConfig = AppConfig::from_build_env().with_origin(page_origin().as_deref());
    static CLIENT: ApiClient = CONFIG.with(ApiClient::from_config);
}

/// Resolved once per page load, on first use.
pub fn config() -> AppConfig {
    CONFIG.with(Clone::clone)
}

pub fn client() -> ApiClient {
    CLIENT.with(Clone::clone)
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
