use dioxus::prelude::*;

use crate::app::{persist_user_state, request_rate_refresh, Route};
use crate::domain::{AppState, Currency};
use crate::util::APP_NAME;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let rate_request = use_context::<Signal<Option<Vec<(Currency, Currency)>>>>();
    let currency = state.with(|s| s.currency);

    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let header_class = match currency {
        Currency::Eur => "border-b border-sky-900/40 bg-slate-950/90 backdrop-blur px-6 py-4",
        Currency::Gbp => "border-b border-emerald-900/40 bg-slate-950/90 backdrop-blur px-6 py-4",
        Currency::Usd => "border-b border-indigo-900/40 bg-slate-950/90 backdrop-blur px-6 py-4",
    };

    let title_class = match currency {
        Currency::Eur => "text-xl font-semibold tracking-tight text-sky-200",
        Currency::Gbp => "text-xl font-semibold tracking-tight text-emerald-200",
        Currency::Usd => "text-xl font-semibold tracking-tight text-indigo-200",
    };

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "{header_class}",
                div { class: "mx-auto grid max-w-6xl grid-cols-[1fr_auto_1fr] items-center gap-4",
                    // Left: app name + settlement currency tagline
                    div { class: "flex items-center gap-3",
                        span { class: "text-2xl", "🖼️" }
                        div {
                            h1 { class: "{title_class}", "{APP_NAME}" }
                            p { class: "text-xs text-slate-500 italic", "settling in {currency.code()}" }
                        }
                    }

                    // Center: settlement currency switcher
                    div { class: "flex gap-1 justify-center",
                        for option in Currency::all() {
                            CurrencyButton {
                                active: currency == option,
                                onclick: {
                                    let mut state = state.clone();
                                    let rate_request = rate_request.clone();
                                    move |_| {
                                        state.with_mut(|s| s.currency = option);
                                        persist_user_state(&state);
                                        // New settlement currency means new conversion pairs.
                                        request_rate_refresh(state.clone(), rate_request.clone());
                                    }
                                },
                                currency: option,
                            }
                        }
                    }

                    // Right: Navigation
                    nav { class: "flex gap-2 text-sm justify-end",
                        NavButton {
                            active: matches!(current_route, Route::Pricing {}),
                            onclick: move |_| { nav.push(Route::Pricing {}); },
                            label: "💶 Pricing",
                            currency,
                        }
                        NavButton {
                            active: matches!(current_route, Route::Costs {}),
                            onclick: move |_| { nav.push(Route::Costs {}); },
                            label: "📋 Costs",
                            currency,
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                            currency,
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(
    active: bool,
    onclick: EventHandler<()>,
    label: &'static str,
    currency: Currency,
) -> Element {
    let class = match (currency, active) {
        (Currency::Eur, true) => {
            "min-w-[5.5rem] rounded-lg border border-sky-500/60 bg-sky-500/15 px-4 py-2 font-semibold text-sky-300"
        }
        (Currency::Eur, false) => {
            "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-sky-700 hover:bg-sky-900/20 hover:text-sky-300"
        }
        (Currency::Gbp, true) => {
            "min-w-[5.5rem] rounded-lg border border-emerald-500/60 bg-emerald-500/15 px-4 py-2 font-semibold text-emerald-300"
        }
        (Currency::Gbp, false) => {
            "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-emerald-700 hover:bg-emerald-900/20 hover:text-emerald-300"
        }
        (Currency::Usd, true) => {
            "min-w-[5.5rem] rounded-lg border border-indigo-500/60 bg-indigo-500/15 px-4 py-2 font-semibold text-indigo-300"
        }
        (Currency::Usd, false) => {
            "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-indigo-700 hover:bg-indigo-900/20 hover:text-indigo-300"
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

#[component]
fn CurrencyButton(active: bool, onclick: EventHandler<()>, currency: Currency) -> Element {
    let class = match (currency, active) {
        (Currency::Eur, true) => {
            "min-w-[5rem] rounded-lg px-3 py-1.5 text-sm font-semibold bg-sky-500/20 text-sky-300 border border-sky-500/40"
        }
        (Currency::Gbp, true) => {
            "min-w-[5rem] rounded-lg px-3 py-1.5 text-sm font-semibold bg-emerald-500/20 text-emerald-300 border border-emerald-500/40"
        }
        (Currency::Usd, true) => {
            "min-w-[5rem] rounded-lg px-3 py-1.5 text-sm font-semibold bg-indigo-500/20 text-indigo-300 border border-indigo-500/40"
        }
        (_, false) => {
            "min-w-[5rem] rounded-lg px-3 py-1.5 text-sm text-slate-500 border border-slate-800 hover:border-slate-600 hover:text-slate-300 transition"
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{currency.symbol()} {currency.code()}"
        }
    }
}
