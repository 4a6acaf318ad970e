use dioxus::prelude::*;

use crate::{
    app::request_sheet_reload,
    domain::{current_listing_profit, base_cost_for, AppState, CostRecord, Supplier},
    infra::sheet,
    ui::{
        components::{
            cost_table::{CostRow, CostTable},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn CostsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let sheet_request = use_context::<Signal<Option<crate::domain::SheetConfig>>>();

    let mut editing = use_signal(|| None::<u32>);
    let mut edit_value = use_signal(String::new);

    let currency = state.with(|st| st.currency);
    let records = state.with(|st| st.records.clone());
    let sheet_error = state.with(|st| st.sheet_error.clone());

    let rows: Vec<CostRow> = records.iter().map(|record| cost_row(&state, record)).collect();

    let on_reload = {
        let state = state.clone();
        let toasts = toasts.clone();
        let sheet_request = sheet_request.clone();
        move |_| {
            request_sheet_reload(state.clone(), sheet_request.clone());
            push_toast(toasts.clone(), ToastKind::Info, "Re-reading the cost workbook...");
        }
    };

    let on_edit_start = {
        let records = records.clone();
        move |size: u32| {
            let current = records
                .iter()
                .find(|record| record.size_area == size)
                .and_then(|record| record.listed_price);
            edit_value.set(current.map(|value| format!("{value:.2}")).unwrap_or_default());
            editing.set(Some(size));
        }
    };

    let on_edit_save = {
        let state = state.clone();
        let toasts = toasts.clone();
        let sheet_request = sheet_request.clone();
        move |_| {
            let Some(size) = editing() else { return };
            let new_price: f64 = match edit_value().trim().parse() {
                Ok(value) if value >= 0.0 => value,
                _ => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        "Listed price must be a non-negative number.",
                    );
                    return;
                }
            };

            let config = state.with(|st| st.sheet.clone());
            let state = state.clone();
            let toasts = toasts.clone();
            let sheet_request = sheet_request.clone();
            // Workbook rewrite is file I/O; keep it off the UI thread like
            // the sheet read path.
            spawn(async move {
                let written = tokio::task::spawn_blocking(move || {
                    sheet::write_listed_price(&config, size, new_price)
                })
                .await;
                match written {
                    Ok(Ok(())) => {
                        editing.set(None);
                        // The workbook stays authoritative: re-read instead of
                        // patching the in-memory records.
                        request_sheet_reload(state.clone(), sheet_request.clone());
                        push_toast(
                            toasts.clone(),
                            ToastKind::Success,
                            format!("Wrote listed price for {size} cm² back to the sheet."),
                        );
                    }
                    Ok(Err(error)) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Write-back failed: {error}"),
                        );
                    }
                    Err(error) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Write-back failed: {error}"),
                        );
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex items-center justify-between",
                div {
                    h2 { class: "text-lg font-semibold {theme::text_primary(currency)}", "Cost table" }
                    p { class: "text-sm text-slate-500",
                        "One row per print size, straight from the workbook. Supplier quotes are shown in their own currency."
                    }
                }
                button { class: "{theme::btn_primary(currency)}", onclick: on_reload, "Reload sheet" }
            }

            if let Some(message) = sheet_error {
                div { class: "rounded-xl border border-rose-500/40 bg-rose-500/10 p-4 text-sm text-rose-200",
                    "{message}"
                }
            }

            CostTable {
                rows,
                currency,
                editing: editing(),
                edit_value: edit_value(),
                on_edit_start,
                on_edit_change: move |value| edit_value.set(value),
                on_edit_save,
                on_edit_cancel: move |_| editing.set(None),
            }
        }
    }
}

fn cost_row(state: &Signal<AppState>, record: &CostRecord) -> CostRow {
    let currency = state.with(|st| st.currency);
    let params = state.with(|st| st.pricing);
    let symbol = currency.symbol();

    let supplier_cell = |supplier: Supplier| {
        let profile = state.with(|st| st.supplier_profile(supplier));
        let quote_symbol = profile.quote_currency.symbol();
        record.quote(supplier).map(|quote| match quote.postage {
            Some(postage) => format!("{quote_symbol}{:.2} + {quote_symbol}{postage:.2}", quote.price),
            None => format!(
                "{quote_symbol}{:.2} + {quote_symbol}{:.2} (flat)",
                quote.price, profile.fallback_postage
            ),
        })
    };

    // The comparison column uses the default supplier the same way the
    // pricing page would, so both screens agree.
    let current_profit = record.listed_price.and_then(|listed| {
        let quote = record.quote(params.supplier)?;
        let profile = state.with(|st| st.supplier_profile(params.supplier));
        let rate = state.with(|st| st.rate_for(profile.quote_currency));
        let base_cost = base_cost_for(quote, profile.fallback_postage, rate);
        let profit = current_listing_profit(listed, base_cost, params.fee, params.tax);
        Some(format!("{symbol}{profit:.2}"))
    });

    CostRow {
        size_area: record.size_area,
        primary: supplier_cell(Supplier::Primary),
        secondary: supplier_cell(Supplier::Secondary),
        listed: record.listed_price.map(|value| format!("{symbol}{value:.2}")),
        current_profit,
    }
}
