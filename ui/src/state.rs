use leptos::*;
use pattern_client::{PatternApiClient, PatternApiConfig};

/// App-wide context: where the remote service lives and how to talk to it.
/// Page/selection state stays inside the components that own it.
#[derive(Clone)]
pub struct AppCtx {
    pub api_base: RwSignal<String>,
    pub api_key: RwSignal<String>,
}

impl AppCtx {
    /// Client for the current endpoint settings. Falls back to the built-in
    /// defaults if the signals hold an unusable key.
    pub fn client(&self) -> PatternApiClient {
        let config = PatternApiConfig::new(self.api_key.get_untracked())
            .with_base_url(self.api_base.get_untracked());
        PatternApiClient::new(config)
            .or_else(|_| PatternApiClient::from_env())
            .expect("default API configuration is usable")
    }
}

pub fn provide_app_ctx(api_base: String, api_key: String) -> AppCtx {
    let ctx = AppCtx {
        api_base: create_rw_signal(api_base),
        api_key: create_rw_signal(api_key),
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_app_ctx() -> AppCtx {
    use_context::<AppCtx>().expect("AppCtx not provided")
}
