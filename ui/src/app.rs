use crate::{chart::ChartModal, state::provide_app_ctx, theme::GLOBAL_CSS};
use leptos::*;
use leptos_meta::*;
use pattern_client::PatternApiConfig;
use pattern_core::{Pager, PatternRecord, PAGE_COUNT};

#[cfg(target_arch = "wasm32")]
use crate::state::use_app_ctx;
#[cfg(target_arch = "wasm32")]
use js_sys::Reflect;
#[cfg(target_arch = "wasm32")]
use pattern_core::RequestSeq;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

#[cfg(target_arch = "wasm32")]
fn read_global(key: &str) -> Option<String> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

fn api_base_default() -> String {
    #[cfg(target_arch = "wasm32")]
    if let Some(base) = read_global("PATTERNRADAR_API_BASE") {
        return base;
    }
    PatternApiConfig::default().base_url
}

fn api_key_default() -> String {
    #[cfg(target_arch = "wasm32")]
    if let Some(key) = read_global("PATTERNRADAR_API_KEY") {
        return key;
    }
    PatternApiConfig::default().api_key
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_ctx(api_base_default(), api_key_default());

    view! {
        <Style>{GLOBAL_CSS}</Style>
        <Title text="PatternRadar"/>
        <div class="app-root">
            <Navbar/>
            <main class="page">
                <PatternBoard/>
            </main>
        </div>
    }
}

const STRATEGY_ITEMS: [(&str, &str); 5] = [
    (
        "Trading Strategies",
        "Access trading strategies tools and insights",
    ),
    (
        "Risk Management",
        "Access risk management tools and insights",
    ),
    (
        "Portfolio Optimization",
        "Access portfolio optimization tools and insights",
    ),
    ("Market Analysis", "Access market analysis tools and insights"),
    ("Backtesting", "Access backtesting tools and insights"),
];

/// Static shell: market strip, brand, hover menus, search box. The search
/// field's only state is a focus flag that widens it.
#[component]
fn Navbar() -> impl IntoView {
    let (search_focused, set_search_focused) = create_signal(false);

    view! {
        <header>
            <div class="market-strip">
                <span>"BTC $43,250.00"</span>
                <span class="up">"+2.45%"</span>
                <span>"Live Market Data - Real-time Updates"</span>
            </div>
            <div class="navbar">
                <div class="brand">
                    <span class="brand-mark">"◉"</span>
                    "PatternRadar"
                </div>
                <nav class="nav-menu">
                    <div class="nav-item">
                        <button>"Future"</button>
                        <div class="nav-flyout panel">
                            <div class="nav-flyout-title">"Futures Trading"</div>
                            <div class="nav-flyout-body">
                                "Access advanced futures trading tools and real-time market data"
                            </div>
                        </div>
                    </div>
                    <div class="nav-item">
                        <button>"Options"</button>
                        <div class="nav-flyout panel">
                            <div class="nav-flyout-title">"Options Trading"</div>
                            <div class="nav-flyout-body">
                                "Comprehensive options analysis and trading strategies"
                            </div>
                        </div>
                    </div>
                    <div class="nav-item">
                        <button>"Strategy"</button>
                        <div class="nav-flyout panel">
                            <div class="strategy-grid">
                                {STRATEGY_ITEMS
                                    .iter()
                                    .map(|(title, desc)| {
                                        view! {
                                            <div class="strategy-entry">
                                                <div class="title">{*title}</div>
                                                <div class="desc">{*desc}</div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    </div>
                    <div class="nav-item">
                        <button>"About"</button>
                        <div class="nav-flyout panel">
                            <div class="nav-flyout-title">"About PatternRadar"</div>
                            <div class="nav-flyout-body">
                                "Learn more about our platform and trading tools"
                            </div>
                        </div>
                    </div>
                </nav>
                <div class="search-wrap">
                    <span class="search-icon">"⌕"</span>
                    <input
                        type="text"
                        placeholder="Search stocks, crypto..."
                        class=move || {
                            if search_focused.get() { "search-input focused" } else { "search-input" }
                        }
                        on:focus=move |_| set_search_focused.set(true)
                        on:blur=move |_| set_search_focused.set(false)
                    />
                </div>
            </div>
        </header>
    }
}

/// Card list over the pattern pages: fetches on mount and on every page
/// change, keeps a spinner up while a call is in flight, and only ever
/// applies the response of the newest request.
#[component]
fn PatternBoard() -> impl IntoView {
    let (pager, set_pager) = create_signal(Pager::new());
    let patterns = create_rw_signal::<Vec<PatternRecord>>(Vec::new());
    let (loading, set_loading) = create_signal(true);
    let (selected, set_selected) = create_signal::<Option<PatternRecord>>(None);

    #[cfg(target_arch = "wasm32")]
    {
        let ctx = use_app_ctx();
        let seq = Rc::new(RefCell::new(RequestSeq::new()));

        {
            let seq = seq.clone();
            create_effect(move |_| {
                let page = pager.get().page();
                let client = ctx.client();
                let token = seq.borrow_mut().begin();
                let seq = seq.clone();
                set_loading.set(true);
                spawn_local(async move {
                    let records = client.patterns_page_or_mock(page).await;
                    // A newer page request owns the view now; drop this one.
                    if !seq.borrow().is_current(token) {
                        return;
                    }
                    patterns.set(records);
                    set_loading.set(false);
                });
            });
        }

        on_cleanup(move || {
            seq.borrow_mut().invalidate();
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = set_loading;

    view! {
        <div class="board">
            {move || {
                if loading.get() {
                    view! {
                        <div class="board-loading">
                            <div class="spinner"></div>
                        </div>
                    }
                        .into_view()
                } else {
                    view! {
                        <div class="card-grid">
                            {patterns
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, record)| pattern_card(record, index, set_selected))
                                .collect_view()}
                        </div>
                        <Pagination pager=pager set_pager=set_pager/>
                    }
                        .into_view()
                }
            }}
            {move || {
                selected
                    .get()
                    .map(|record| view! { <ChartModal record=record set_selected=set_selected/> })
            }}
        </div>
    }
}

fn pattern_card(
    record: PatternRecord,
    index: usize,
    set_selected: WriteSignal<Option<PatternRecord>>,
) -> impl IntoView {
    let key = record.display_key(index);
    let change_class = match record.change_pct() {
        Some(pct) if pct < 0.0 => "card-change down",
        Some(_) => "card-change up",
        None => "card-change",
    };
    let change_label = record
        .change_pct()
        .map(|pct| format!("{pct:+.2}%"))
        .unwrap_or_else(|| "–".to_string());
    let record_for_click = record.clone();

    view! {
        <div class="pattern-card panel" data-key=key>
            <button
                class="chart-open"
                on:click=move |_| set_selected.set(Some(record_for_click.clone()))
            >
                "Chart"
            </button>
            <h3 class="card-symbol">{record.symbol.clone()}</h3>
            <ul class="card-stats">
                <li>"📅 " <span class="label">"Date:"</span> {record.date.clone()}</li>
                <li>
                    <span class="label">"Open:"</span>
                    <span class="num">{format!("₹{:.2}", record.open)}</span>
                </li>
                <li>
                    <span class="label">"Close:"</span>
                    <span class="num">{format!("₹{:.2}", record.close)}</span>
                    " "
                    <span class=change_class>{change_label}</span>
                </li>
                <li>
                    <span class="label">"High:"</span>
                    <span class="num">{format!("₹{:.2}", record.high)}</span>
                </li>
                <li>
                    <span class="label">"Low:"</span>
                    <span class="num">{format!("₹{:.2}", record.low)}</span>
                </li>
                <li>
                    <span class="label">"Volume:"</span>
                    <span class="num">{record.volume.to_string()}</span>
                </li>
                <li>
                    <span class="label">"Prev Close:"</span>
                    <span class="num">{format!("₹{:.2}", record.prev_close)}</span>
                </li>
                <li>
                    <span class="label">"Avg Price:"</span>
                    <span class="num">{format!("₹{:.2}", record.avg_price)}</span>
                </li>
                <li class="card-patterns">"📈 " <span class="label">"Pattern:"</span> {record.matched_patterns.clone()}</li>
            </ul>
        </div>
    }
}

/// Fixed five-page pager. Prev/Next clamp at the edges; clamped clicks and
/// jumps to the current page trigger no refetch.
#[component]
fn Pagination(pager: ReadSignal<Pager>, set_pager: WriteSignal<Pager>) -> impl IntoView {
    view! {
        <div class="pager">
            <button
                disabled=move || pager.get().page() == 1
                on:click=move |_| {
                    let mut next = pager.get_untracked();
                    if next.prev() {
                        set_pager.set(next);
                    }
                }
            >
                "Previous"
            </button>
            {(1..=PAGE_COUNT)
                .map(|n| {
                    view! {
                        <button
                            class=move || if pager.get().page() == n { "active" } else { "" }
                            on:click=move |_| {
                                let mut next = pager.get_untracked();
                                if next.jump(n) {
                                    set_pager.set(next);
                                }
                            }
                        >
                            {n}
                        </button>
                    }
                })
                .collect_view()}
            <button
                disabled=move || pager.get().page() == PAGE_COUNT
                on:click=move |_| {
                    let mut next = pager.get_untracked();
                    if next.next() {
                        set_pager.set(next);
                    }
                }
            >
                "Next"
            </button>
        </div>
    }
}
