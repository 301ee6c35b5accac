pub mod app;
pub mod chart;
pub mod state;
pub mod theme;

pub use app::App;

#[cfg(all(any(feature = "csr", feature = "hydrate"), target_arch = "wasm32"))]
use leptos::*;
#[cfg(all(any(feature = "csr", feature = "hydrate"), target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| view! { <App/> });
}

#[cfg(all(feature = "hydrate", target_arch = "wasm32"))]
#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| view! { <App/> });
}
