use std::time::SystemTime;

use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{
        base_cost_for, current_listing_profit, nearest_record, recommend, AppState, Currency,
        PricingParams, PricingRequest, Supplier,
    },
    ui::{
        components::{
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn PricingPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let currency = state.with(|st| st.currency);
    let records = state.with(|st| st.records.clone());
    let params = state.with(|st| st.pricing);

    let mut size_input = use_signal(String::new);
    let mut manual_cost_input = use_signal(String::new);
    let mut margin_input = use_signal(|| format!("{:.2}", params.margin));
    let mut floor_input = use_signal(|| format!("{:.2}", params.min_profit));
    let mut fee_input = use_signal(|| format!("{:.3}", params.fee));
    let mut tax_input = use_signal(|| format!("{:.2}", params.tax));
    let mut supplier = use_signal(|| params.supplier);

    let symbol = currency.symbol();

    // Everything below is a pure projection of the inputs; nothing is
    // cached between renders.
    let parsed = parse_inputs(
        margin_input(),
        floor_input(),
        fee_input(),
        tax_input(),
    );

    let outcome = match &parsed {
        Err(message) => Outcome::InputError(message.clone()),
        Ok(fractions) => compute_outcome(
            &state,
            &records,
            size_input().trim(),
            manual_cost_input().trim(),
            supplier(),
            *fractions,
        ),
    };

    let on_save_defaults = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let parsed = parsed.clone();
        move |_| match &parsed {
            Ok(fractions) => {
                state.with_mut(|st| {
                    st.pricing = PricingParams {
                        supplier: supplier(),
                        margin: fractions.margin,
                        min_profit: fractions.min_profit,
                        fee: fractions.fee,
                        tax: fractions.tax,
                    };
                });
                persist_user_state(&state);
                push_toast(toasts.clone(), ToastKind::Success, "Saved pricing defaults.");
            }
            Err(message) => {
                push_toast(toasts.clone(), ToastKind::Error, message.clone());
            }
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "{theme::panel_border(currency)} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "What are we pricing?" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-3",
                    div {
                        label { class: "{theme::label_class(currency)}", "Print size (cm²)" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            placeholder: "e.g. 630",
                            value: size_input(),
                            oninput: move |evt| size_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class(currency)}", "Supplier" }
                        div { class: "mt-1 flex gap-2",
                            for option in [Supplier::Primary, Supplier::Secondary] {
                                button {
                                    class: if supplier() == option { theme::btn_active(currency) } else { theme::btn_inactive(currency) },
                                    onclick: move |_| supplier.set(option),
                                    "{option.name()}"
                                }
                            }
                        }
                    }
                    div {
                        label { class: "{theme::label_class(currency)}", "Manual base cost ({currency.code()}, optional)" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            placeholder: "overrides the sheet",
                            value: manual_cost_input(),
                            oninput: move |evt| manual_cost_input.set(evt.value()),
                        }
                    }
                }
            }

            section {
                class: "{theme::panel_border(currency)} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Margin & deductions" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-4",
                    div {
                        label { class: "{theme::label_class(currency)}", "Target margin (0-1)" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            value: margin_input(),
                            oninput: move |evt| margin_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class(currency)}", "Minimum profit ({symbol})" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            value: floor_input(),
                            oninput: move |evt| floor_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class(currency)}", "Marketplace fee (0-1)" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            value: fee_input(),
                            oninput: move |evt| fee_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class(currency)}", "Tax on price (0-1)" }
                        input {
                            class: "mt-1 w-full {theme::input_class(currency)}",
                            value: tax_input(),
                            oninput: move |evt| tax_input.set(evt.value()),
                        }
                    }
                }
                div { class: "mt-4",
                    button { class: "{theme::btn_primary(currency)}", onclick: on_save_defaults, "Save as defaults" }
                }
            }

            OutcomeSection { outcome, currency }
        }
    }
}

/// How a single calculation turned out, ready for display.
#[derive(Clone, PartialEq)]
enum Outcome {
    /// Nothing to price yet (no size entered, no manual cost).
    Idle,
    InputError(String),
    Priced(Box<PricedView>),
}

#[derive(Clone, PartialEq)]
struct PricedView {
    used_size: Option<u32>,
    nearest_notice: Option<String>,
    base_cost: f64,
    rate_notice: Option<String>,
    price: String,
    desired_profit: String,
    fee_amount: String,
    tax_amount: Option<String>,
    profit: String,
    listed: Option<ListingView>,
}

#[derive(Clone, PartialEq)]
struct ListingView {
    listed_price: Option<String>,
    current_profit: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
struct Fractions {
    margin: f64,
    min_profit: f64,
    fee: f64,
    tax: f64,
}

fn parse_inputs(
    margin: String,
    floor: String,
    fee: String,
    tax: String,
) -> Result<Fractions, String> {
    let margin: f64 = margin
        .trim()
        .parse()
        .map_err(|_| "Target margin must be a number between 0 and 1")?;
    if !(0.0..=1.0).contains(&margin) {
        return Err("Target margin must be between 0 and 1".to_string());
    }
    let min_profit: f64 = floor
        .trim()
        .parse()
        .map_err(|_| "Minimum profit must be numeric")?;
    if min_profit < 0.0 {
        return Err("Minimum profit must not be negative".to_string());
    }
    let fee: f64 = fee
        .trim()
        .parse()
        .map_err(|_| "Marketplace fee must be a fraction like 0.15")?;
    let tax: f64 = if tax.trim().is_empty() {
        0.0
    } else {
        tax.trim()
            .parse()
            .map_err(|_| "Tax must be a fraction like 0.19, or empty")?
    };
    if !(0.0..1.0).contains(&fee) || !(0.0..1.0).contains(&tax) {
        return Err("Fee and tax must each be fractions below 1".to_string());
    }
    Ok(Fractions {
        margin,
        min_profit,
        fee,
        tax,
    })
}

fn compute_outcome(
    state: &Signal<AppState>,
    records: &[crate::domain::CostRecord],
    size_text: &str,
    manual_cost_text: &str,
    supplier: Supplier,
    fractions: Fractions,
) -> Outcome {
    let currency = state.with(|st| st.currency);
    let symbol = currency.symbol();

    // A manual cost skips the sheet entirely; the user typed the settlement
    // currency figure themselves.
    let manual_cost = match manual_cost_text {
        "" => None,
        text => match text.parse::<f64>() {
            Ok(value) if value >= 0.0 => Some(value),
            _ => return Outcome::InputError("Manual base cost must be a non-negative number".into()),
        },
    };

    let (base_cost, used_size, nearest_notice, rate_notice, listed) = if let Some(cost) = manual_cost
    {
        (cost, None, None, None, None)
    } else {
        let requested: u32 = match size_text {
            "" => return Outcome::Idle,
            text => match text.parse::<f64>() {
                Ok(value) if value > 0.0 => value.round() as u32,
                _ => return Outcome::InputError("Print size must be a positive number".into()),
            },
        };

        let Some(found) = nearest_record(records, requested) else {
            return Outcome::InputError(
                "No cost data loaded; add your workbook under Settings".into(),
            );
        };

        let Some(quote) = found.record.quote(supplier) else {
            return Outcome::InputError(format!(
                "{} has not priced {} cm² yet",
                supplier.name(),
                found.used_size()
            ));
        };

        let profile = state.with(|st| st.supplier_profile(supplier));
        let rate = state.with(|st| st.rate_for(profile.quote_currency));
        let base_cost = base_cost_for(quote, profile.fallback_postage, rate);

        let nearest_notice = (!found.exact).then(|| {
            format!(
                "No record for {} cm²; using the nearest size, {} cm².",
                found.requested,
                found.used_size()
            )
        });
        let rate_notice = (profile.quote_currency != currency).then(|| {
            format!(
                "Converted from {} at {rate:.4} {}/{}.",
                profile.quote_currency.code(),
                currency.code(),
                profile.quote_currency.code()
            )
        });

        let listed = ListingView {
            listed_price: found
                .record
                .listed_price
                .map(|value| format!("{symbol}{value:.2}")),
            current_profit: found.record.listed_price.map(|value| {
                let profit =
                    current_listing_profit(value, base_cost, fractions.fee, fractions.tax);
                format!("{symbol}{profit:.2}")
            }),
        };

        (
            base_cost,
            Some(found.used_size()),
            nearest_notice,
            rate_notice,
            Some(listed),
        )
    };

    let request = PricingRequest {
        base_cost,
        margin: fractions.margin,
        min_profit: fractions.min_profit,
        fee: fractions.fee,
        tax: fractions.tax,
    };

    match recommend(&request) {
        Ok(result) => Outcome::Priced(Box::new(PricedView {
            used_size,
            nearest_notice,
            base_cost,
            rate_notice,
            price: format!("{symbol}{:.2}", result.price),
            desired_profit: format!("{symbol}{:.2}", result.desired_profit),
            fee_amount: format!("{symbol}{:.2}", result.fee_amount),
            tax_amount: (fractions.tax > 0.0).then(|| format!("{symbol}{:.2}", result.tax_amount)),
            profit: format!("{symbol}{:.2}", result.profit),
            listed,
        })),
        Err(error) => Outcome::InputError(error.to_string()),
    }
}

#[component]
fn OutcomeSection(outcome: Outcome, currency: Currency) -> Element {
    let symbol = currency.symbol();
    match outcome {
        Outcome::Idle => rsx! {
            section { class: "{theme::panel_border(currency)} p-6 text-sm text-slate-400",
                "Enter a print size (or a manual base cost) to get a recommendation."
            }
        },
        Outcome::InputError(message) => rsx! {
            section { class: "rounded-xl border border-rose-500/40 bg-rose-500/10 p-6 text-sm text-rose-200",
                "{message}"
            }
        },
        Outcome::Priced(view) => rsx! {
            section { class: "space-y-4",
                if let Some(notice) = view.nearest_notice.clone() {
                    p { class: "rounded-lg border border-amber-500/40 bg-amber-500/10 px-4 py-2 text-sm text-amber-200",
                        "{notice}"
                    }
                }
                div { class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-4",
                    KpiCard {
                        title: "Recommended price".to_string(),
                        value: view.price.clone(),
                        description: view.used_size.map(|size| format!("for {size} cm²")),
                        currency,
                    }
                    KpiCard {
                        title: "Base cost".to_string(),
                        value: format!("{symbol}{:.2}", view.base_cost),
                        description: view.rate_notice.clone(),
                        currency,
                    }
                    KpiCard {
                        title: "Marketplace fee".to_string(),
                        value: view.fee_amount.clone(),
                        description: view.tax_amount.clone().map(|tax| format!("plus {tax} tax")),
                        currency,
                    }
                    KpiCard {
                        title: "Profit".to_string(),
                        value: view.profit.clone(),
                        description: Some(format!("target was {}", view.desired_profit)),
                        currency,
                    }
                }
                if let Some(listing) = view.listed.clone() {
                    div { class: "{theme::panel_border(currency)} p-5",
                        h3 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Current marketplace listing" }
                        div { class: "mt-3 flex gap-10 text-sm",
                            div {
                                p { class: "text-xs uppercase text-slate-500", "Listed price" }
                                p { class: "mt-1 text-lg font-semibold {theme::text_primary(currency)}",
                                    {listing.listed_price.clone().unwrap_or_else(|| "Not set".to_string())}
                                }
                            }
                            div {
                                p { class: "text-xs uppercase text-slate-500", "Current profit" }
                                p { class: "mt-1 text-lg font-semibold {theme::text_secondary(currency)}",
                                    {listing.current_profit.clone().unwrap_or_else(|| "n/a".to_string())}
                                }
                            }
                        }
                    }
                }
            }
        },
    }
}

/// Shared by the settings page for cache ages.
pub fn humanize_age(time: SystemTime) -> String {
    let secs = time.elapsed().map(|elapsed| elapsed.as_secs()).unwrap_or(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}
