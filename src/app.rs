use std::{path::PathBuf, time::Duration};

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{normalize, AppState, CacheResource, Currency, SheetConfig},
    infra::{
        rates::{RateClient, RateSource},
        sheet,
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CostsPage, PricingPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

/// Shared TTL before cached sheet data and rates are considered old.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/pricing")]
    Pricing {},
    #[route("/costs")]
    Costs {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Reload triggers shared across routes. The resources only run when a
    // request is queued, and consume it before touching state, so writing
    // AppState from inside them cannot re-trigger the fetch.
    let sheet_request = use_signal(|| None::<SheetConfig>);
    use_context_provider(|| sheet_request.clone());

    let rate_request = use_signal(|| None::<Vec<(Currency, Currency)>>);
    use_context_provider(|| rate_request.clone());

    use_hook({
        let state = state.clone();
        let sheet_request = sheet_request.clone();
        let rate_request = rate_request.clone();
        move || {
            request_sheet_reload(state.clone(), sheet_request.clone());
            request_rate_refresh(state.clone(), rate_request.clone());
        }
    });

    let _sheet = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let sheet_request = sheet_request.clone();
        move || async move { fetch_sheet(state.clone(), toasts.clone(), sheet_request.clone()).await }
    });

    let _rates = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let rate_request = rate_request.clone();
        move || async move { fetch_rates(state.clone(), toasts.clone(), rate_request.clone()).await }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("Failed to persist user state: {err}");
    }
}

/// Queue a sheet re-read with the currently configured workbook.
pub fn request_sheet_reload(state: Signal<AppState>, mut sheet_request: Signal<Option<SheetConfig>>) {
    let config = state.with(|st| st.sheet.clone());
    sheet_request.set(Some(config));
}

/// Queue a rate fetch for every supplier quote currency that differs from the
/// settlement currency.
pub fn request_rate_refresh(
    state: Signal<AppState>,
    mut rate_request: Signal<Option<Vec<(Currency, Currency)>>>,
) {
    let pairs = state.with(|st| {
        let mut pairs = Vec::new();
        for profile in [st.suppliers.primary, st.suppliers.secondary] {
            let pair = (profile.quote_currency, st.currency);
            if pair.0 != pair.1 && !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
        pairs
    });
    rate_request.set(Some(pairs));
}

async fn fetch_sheet(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut sheet_request: Signal<Option<SheetConfig>>,
) -> Option<usize> {
    let Some(config) = sheet_request() else {
        return None;
    };
    sheet_request.set(None);

    println!("[sheet] reading {} ({})", config.path, config.sheet_name);

    let path = PathBuf::from(&config.path);
    let rows = config.rows;
    let loaded = tokio::task::spawn_blocking(move || {
        sheet::load_cost_grid(&path, &config.sheet_name).map_err(|err| err.to_string())
    })
    .await;

    let grid = match loaded {
        Ok(Ok(grid)) => grid,
        Ok(Err(err)) => {
            record_sheet_failure(&mut state, toasts, err);
            return None;
        }
        Err(err) => {
            record_sheet_failure(&mut state, toasts, format!("sheet read task failed: {err}"));
            return None;
        }
    };

    match normalize::normalize(&grid, &rows) {
        Ok(records) => {
            let count = records.len();
            state.with_mut(|st| {
                st.records = records;
                st.sheet_error = None;
                st.cache
                    .record_fetch(CacheResource::CostSheet, std::time::SystemTime::now());
            });
            println!("[sheet] loaded {count} cost column(s)");
            Some(count)
        }
        Err(err) => {
            record_sheet_failure(&mut state, toasts, err.to_string());
            None
        }
    }
}

fn record_sheet_failure(
    state: &mut Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    message: String,
) {
    println!("[sheet] load failed: {message}");
    state.with_mut(|st| {
        st.records.clear();
        st.sheet_error = Some(message.clone());
    });
    push_toast(toasts, ToastKind::Error, format!("Cost sheet: {message}"));
}

async fn fetch_rates(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut rate_request: Signal<Option<Vec<(Currency, Currency)>>>,
) -> Option<usize> {
    let Some(pairs) = rate_request() else {
        return None;
    };
    rate_request.set(None);
    if pairs.is_empty() {
        return Some(0);
    }

    let Some(client) = RateClient::shared() else {
        push_toast(
            toasts.clone(),
            ToastKind::Error,
            "Failed to initialise the exchange-rate client.",
        );
        return None;
    };

    let mut degraded = None;
    for (from, to) in &pairs {
        let quote = client.get_rate(*from, *to).await;
        println!(
            "[rates] {}→{} = {:.4} ({:?})",
            from.code(),
            to.code(),
            quote.rate,
            quote.source
        );
        state.with_mut(|st| {
            st.rates.insert((*from, *to), quote.rate);
            st.cache
                .record_fetch(CacheResource::Rate(*from, *to), quote.fetched_at);
        });
        match quote.source {
            RateSource::Stale | RateSource::Fallback => degraded = Some(quote.source),
            RateSource::Fresh | RateSource::Cached => {}
        }
    }

    if let Some(source) = degraded {
        let detail = match source {
            RateSource::Fallback => "built-in approximate rates",
            _ => "stale cached rates",
        };
        push_toast(
            toasts.clone(),
            ToastKind::Warning,
            format!("Exchange-rate service unreachable; using {detail}."),
        );
    }

    Some(pairs.len())
}

#[component]
pub fn Pricing() -> Element {
    rsx! { Shell { PricingPage {} } }
}

#[component]
pub fn Costs() -> Element {
    rsx! { Shell { CostsPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
