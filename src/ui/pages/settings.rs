use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, request_rate_refresh, request_sheet_reload, CACHE_TTL},
    domain::{AppState, CacheResource, Currency, RowMap, SheetConfig, Supplier},
    infra::rates::RateClient,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::pricing::humanize_age,
        theme,
    },
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let sheet_request = use_context::<Signal<Option<SheetConfig>>>();
    let rate_request = use_context::<Signal<Option<Vec<(Currency, Currency)>>>>();

    let currency = state.with(|st| st.currency);
    let sheet = state.with(|st| st.sheet.clone());
    let suppliers = state.with(|st| st.suppliers);

    let mut path_input = use_signal(|| sheet.path.clone());
    let mut sheet_name_input = use_signal(|| sheet.sheet_name.clone());
    let mut size_row_input = use_signal(|| sheet.rows.size_row.to_string());
    let mut primary_price_row_input = use_signal(|| sheet.rows.primary_price_row.to_string());
    let mut primary_postage_row_input = use_signal(|| sheet.rows.primary_postage_row.to_string());
    let mut secondary_price_row_input = use_signal(|| sheet.rows.secondary_price_row.to_string());
    let mut secondary_postage_row_input =
        use_signal(|| sheet.rows.secondary_postage_row.to_string());
    let mut listed_row_input = use_signal(|| {
        sheet
            .rows
            .listed_price_row
            .map(|row| row.to_string())
            .unwrap_or_default()
    });

    let mut primary_postage_input =
        use_signal(|| format!("{:.2}", suppliers.primary.fallback_postage));
    let mut secondary_postage_input =
        use_signal(|| format!("{:.2}", suppliers.secondary.fallback_postage));

    let cache_entries = state.with(|st| {
        st.cache
            .iter()
            .map(|(resource, time)| {
                let mut age = humanize_age(*time);
                if st.is_stale(resource, CACHE_TTL) {
                    age.push_str(" (stale)");
                }
                (cache_label(resource), age)
            })
            .collect::<Vec<_>>()
    });

    let on_apply_sheet = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let sheet_request = sheet_request.clone();
        move |_| {
            let parsed = parse_sheet_config(
                path_input(),
                sheet_name_input(),
                size_row_input(),
                primary_price_row_input(),
                primary_postage_row_input(),
                secondary_price_row_input(),
                secondary_postage_row_input(),
                listed_row_input(),
            );
            match parsed {
                Ok(config) => {
                    state.with_mut(|st| st.sheet = config);
                    persist_user_state(&state);
                    request_sheet_reload(state.clone(), sheet_request.clone());
                    push_toast(
                        toasts.clone(),
                        ToastKind::Success,
                        "Workbook settings applied; re-reading the sheet.",
                    );
                }
                Err(message) => push_toast(toasts.clone(), ToastKind::Error, message),
            }
        }
    };

    let on_reset_rows = {
        let toasts = toasts.clone();
        move |_| {
            let defaults = RowMap::default();
            size_row_input.set(defaults.size_row.to_string());
            primary_price_row_input.set(defaults.primary_price_row.to_string());
            primary_postage_row_input.set(defaults.primary_postage_row.to_string());
            secondary_price_row_input.set(defaults.secondary_price_row.to_string());
            secondary_postage_row_input.set(defaults.secondary_postage_row.to_string());
            listed_row_input.set(
                defaults
                    .listed_price_row
                    .map(|row| row.to_string())
                    .unwrap_or_default(),
            );
            push_toast(toasts.clone(), ToastKind::Info, "Row layout reset to the default workbook.");
        }
    };

    let on_apply_suppliers = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let rate_request = rate_request.clone();
        move |_| {
            let primary: Result<f64, _> = primary_postage_input().trim().parse();
            let secondary: Result<f64, _> = secondary_postage_input().trim().parse();
            match (primary, secondary) {
                (Ok(primary), Ok(secondary)) if primary >= 0.0 && secondary >= 0.0 => {
                    state.with_mut(|st| {
                        st.suppliers.primary.fallback_postage = primary;
                        st.suppliers.secondary.fallback_postage = secondary;
                    });
                    persist_user_state(&state);
                    request_rate_refresh(state.clone(), rate_request.clone());
                    push_toast(toasts.clone(), ToastKind::Success, "Supplier settings saved.");
                }
                _ => push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Fallback postage must be a non-negative number.",
                ),
            }
        }
    };

    let on_clear_cache = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| st.cache.clear());
            spawn(async move {
                if let Some(client) = RateClient::shared() {
                    client.clear_cache().await;
                }
            });
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Cleared cached data. Everything will refresh on next fetch.",
            );
        }
    };

    let on_refresh_rates = {
        let state = state.clone();
        let toasts = toasts.clone();
        let rate_request = rate_request.clone();
        move |_| {
            request_rate_refresh(state.clone(), rate_request.clone());
            push_toast(toasts.clone(), ToastKind::Info, "Refreshing exchange rates...");
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "{theme::panel_border(currency)} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Cost workbook" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: "{theme::label_class(currency)}", "Workbook path" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            value: path_input(),
                            oninput: move |evt| path_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class(currency)}", "Sheet name" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            value: sheet_name_input(),
                            oninput: move |evt| sheet_name_input.set(evt.value()),
                        }
                    }
                }
                p { class: "mt-5 text-xs text-slate-500",
                    "Row layout (zero-based). Workbooks differ, so tell the normalizer which row holds which figure."
                }
                div { class: "mt-2 grid gap-4 sm:grid-cols-3",
                    RowField { currency, label: "Size row", value: size_row_input(), oninput: move |v| size_row_input.set(v) }
                    RowField { currency, label: "Primary price row", value: primary_price_row_input(), oninput: move |v| primary_price_row_input.set(v) }
                    RowField { currency, label: "Primary postage row", value: primary_postage_row_input(), oninput: move |v| primary_postage_row_input.set(v) }
                    RowField { currency, label: "Secondary price row", value: secondary_price_row_input(), oninput: move |v| secondary_price_row_input.set(v) }
                    RowField { currency, label: "Secondary postage row", value: secondary_postage_row_input(), oninput: move |v| secondary_postage_row_input.set(v) }
                    RowField { currency, label: "Listed price row (blank = none)", value: listed_row_input(), oninput: move |v| listed_row_input.set(v) }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "{theme::btn_primary(currency)}", onclick: on_apply_sheet, "Apply & reload" }
                    button { class: "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800", onclick: on_reset_rows, "Reset rows" }
                }
            }

            section {
                class: "{theme::panel_border(currency)} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Suppliers" }
                div { class: "mt-4 grid gap-6 sm:grid-cols-2",
                    SupplierEditor {
                        currency,
                        supplier: Supplier::Primary,
                        quote_currency: suppliers.primary.quote_currency,
                        postage_value: primary_postage_input(),
                        on_postage: move |v| primary_postage_input.set(v),
                        on_currency: {
                            let mut state = state.clone();
                            let rate_request = rate_request.clone();
                            move |chosen| {
                                state.with_mut(|st| st.suppliers.primary.quote_currency = chosen);
                                persist_user_state(&state);
                                request_rate_refresh(state.clone(), rate_request.clone());
                            }
                        },
                    }
                    SupplierEditor {
                        currency,
                        supplier: Supplier::Secondary,
                        quote_currency: suppliers.secondary.quote_currency,
                        postage_value: secondary_postage_input(),
                        on_postage: move |v| secondary_postage_input.set(v),
                        on_currency: {
                            let mut state = state.clone();
                            let rate_request = rate_request.clone();
                            move |chosen| {
                                state.with_mut(|st| st.suppliers.secondary.quote_currency = chosen);
                                persist_user_state(&state);
                                request_rate_refresh(state.clone(), rate_request.clone());
                            }
                        },
                    }
                }
                div { class: "mt-4",
                    button { class: "{theme::btn_primary(currency)}", onclick: on_apply_suppliers, "Save supplier settings" }
                }
            }

            section {
                class: "{theme::panel_border(currency)} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Cache Status" }
                if cache_entries.is_empty() {
                    p { class: "mt-3 text-sm text-slate-400", "No cached fetches yet." }
                } else {
                    ul {
                        class: "mt-3 space-y-2 text-sm text-slate-300",
                        for (label, age) in cache_entries {
                            li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                                span { "{label}" }
                                span { class: "text-xs text-slate-500", "{age}" }
                            }
                        }
                    }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "rounded-lg border border-amber-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-amber-200 hover:bg-amber-500/10", onclick: on_clear_cache, "Clear Cache Timestamps" }
                    button { class: "rounded-lg border border-sky-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-sky-200 hover:bg-sky-500/10", onclick: on_refresh_rates, "Refresh Exchange Rates" }
                }
            }

            section {
                class: "flex flex-col items-center gap-2 {theme::panel_border(currency)} p-6 text-center text-slate-400",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Data Attribution" }
                p { class: "text-sm",
                    "Exchange rates provided by the Frankfurter API, built on European Central Bank reference rates."
                }
                p { class: "text-xs text-slate-500",
                    "When the API is unreachable the app falls back to built-in approximate rates and says so."
                }
            }
        }
    }
}

#[component]
fn RowField(
    currency: Currency,
    label: &'static str,
    value: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            label { class: "{theme::label_class(currency)}", "{label}" }
            input {
                class: "mt-1 w-full {theme::input_small(currency)}",
                value: "{value}",
                oninput: move |evt| oninput.call(evt.value()),
            }
        }
    }
}

#[component]
fn SupplierEditor(
    currency: Currency,
    supplier: Supplier,
    quote_currency: Currency,
    postage_value: String,
    on_postage: EventHandler<String>,
    on_currency: EventHandler<Currency>,
) -> Element {
    rsx! {
        div { class: "rounded-lg border border-slate-800 bg-slate-900/60 p-4",
            h3 { class: "text-sm font-semibold {theme::text_secondary(currency)}", "{supplier.name()}" }
            div { class: "mt-3",
                label { class: "{theme::label_class(currency)}", "Quote currency" }
                div { class: "mt-1 flex gap-2",
                    for option in Currency::all() {
                        button {
                            class: if quote_currency == option { theme::btn_active(currency) } else { theme::btn_inactive(currency) },
                            onclick: move |_| on_currency.call(option),
                            "{option.code()}"
                        }
                    }
                }
            }
            div { class: "mt-3",
                label { class: "{theme::label_class(currency)}", "Fallback postage ({quote_currency.symbol()})" }
                input {
                    class: "mt-1 w-full {theme::input_small(currency)}",
                    value: "{postage_value}",
                    oninput: move |evt| on_postage.call(evt.value()),
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn parse_sheet_config(
    path: String,
    sheet_name: String,
    size_row: String,
    primary_price_row: String,
    primary_postage_row: String,
    secondary_price_row: String,
    secondary_postage_row: String,
    listed_row: String,
) -> Result<SheetConfig, String> {
    let path = path.trim().to_string();
    if path.is_empty() {
        return Err("Workbook path must not be empty".to_string());
    }
    let sheet_name = sheet_name.trim().to_string();
    if sheet_name.is_empty() {
        return Err("Sheet name must not be empty".to_string());
    }

    let parse_row = |label: &str, value: &str| -> Result<usize, String> {
        value
            .trim()
            .parse()
            .map_err(|_| format!("{label} must be a non-negative row index"))
    };

    let rows = RowMap {
        size_row: parse_row("Size row", &size_row)?,
        primary_price_row: parse_row("Primary price row", &primary_price_row)?,
        primary_postage_row: parse_row("Primary postage row", &primary_postage_row)?,
        secondary_price_row: parse_row("Secondary price row", &secondary_price_row)?,
        secondary_postage_row: parse_row("Secondary postage row", &secondary_postage_row)?,
        listed_price_row: match listed_row.trim() {
            "" => None,
            value => Some(parse_row("Listed price row", value)?),
        },
    };

    Ok(SheetConfig {
        path,
        sheet_name,
        rows,
    })
}

fn cache_label(resource: &CacheResource) -> String {
    match resource {
        CacheResource::CostSheet => "Cost sheet".to_string(),
        CacheResource::Rate(from, to) => format!("Rate {}→{}", from.code(), to.code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_config_parses_with_blank_listed_row() {
        let config = parse_sheet_config(
            "costs.xlsx".into(),
            "Print Costs".into(),
            "0".into(),
            "5".into(),
            "6".into(),
            "8".into(),
            "9".into(),
            "".into(),
        )
        .unwrap();
        assert_eq!(config.rows.listed_price_row, None);
        assert_eq!(config.rows.primary_postage_row, 6);
    }

    #[test]
    fn sheet_config_rejects_non_numeric_rows() {
        let err = parse_sheet_config(
            "costs.xlsx".into(),
            "Print Costs".into(),
            "top".into(),
            "5".into(),
            "6".into(),
            "8".into(),
            "9".into(),
            "12".into(),
        )
        .unwrap_err();
        assert!(err.contains("Size row"));
    }
}
