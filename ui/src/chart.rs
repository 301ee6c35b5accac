use leptos::*;
use pattern_core::PatternRecord;

#[cfg(target_arch = "wasm32")]
use crate::state::use_app_ctx;
#[cfg(target_arch = "wasm32")]
use chart_frontend::ChartHandle;
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

#[cfg(target_arch = "wasm32")]
type HandleSignal = RwSignal<Option<Rc<ChartHandle>>>;
#[cfg(not(target_arch = "wasm32"))]
type HandleSignal = ();

/// Modal chart view for one selected record. The `ChartHandle` behind the
/// canvas is a single-owner resource: any previous handle is destroyed
/// before a replacement exists, and `on_cleanup` destroys it on close and
/// on selection change (each selection mounts a fresh modal).
#[component]
pub fn ChartModal(
    record: PatternRecord,
    set_selected: WriteSignal<Option<PatternRecord>>,
) -> impl IntoView {
    let symbol = record.symbol.clone();
    let title = format!("{symbol} - Candlestick Chart");
    let subtitle = record.matched_patterns.clone();
    let canvas_id = format!("chart-canvas-{symbol}");
    let (loading, set_loading) = create_signal(true);

    #[cfg(target_arch = "wasm32")]
    let handle: HandleSignal = create_rw_signal(None);
    #[cfg(not(target_arch = "wasm32"))]
    let handle: HandleSignal = ();
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (&handle, set_loading);

    #[cfg(target_arch = "wasm32")]
    {
        let ctx = use_app_ctx();
        let canvas_id = canvas_id.clone();
        let fetch_symbol = symbol.clone();
        spawn_local(async move {
            let client = ctx.client();
            let bars = client.stock_series_or_mock(&fetch_symbol).await;
            // try_* throughout: the modal may have closed while the fetch
            // was in flight, and a late arrival is ignored, not an error.
            if set_loading.try_set(false).is_some() {
                return;
            }
            // The canvas mounts when the spinner leaves; wait one tick.
            TimeoutFuture::new(0).await;
            let Some(prev) = handle.try_get_untracked() else {
                return;
            };
            if let Some(prev) = prev {
                prev.destroy();
            }
            match ChartHandle::new(&canvas_id) {
                Ok(h) => {
                    h.set_series(bars);
                    let h = Rc::new(h);
                    if let Some(Some(stale)) = handle.try_set(Some(h)) {
                        stale.destroy();
                    }
                }
                Err(err) => web_sys::console::error_1(&err),
            }
        });

        on_cleanup(move || {
            if let Some(h) = handle.get_untracked() {
                h.destroy();
            }
        });
    }

    view! {
        <div class="modal-backdrop">
            <div class="modal panel">
                <div class="modal-header">
                    <div>
                        <h2>{title}</h2>
                        <div class="modal-sub">{subtitle}</div>
                    </div>
                    <button
                        class="modal-close"
                        aria-label="Close chart"
                        on:click=move |_| set_selected.set(None)
                    >
                        "×"
                    </button>
                </div>
                <div class="modal-body">
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="chart-loading">
                                    <div class="spinner"></div>
                                    <span>"Loading chart data..."</span>
                                </div>
                            }
                                .into_view()
                        } else {
                            view! { <canvas id=canvas_id.clone() class="chart-canvas"></canvas> }
                                .into_view()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
