//! Currency-specific theme helpers for consistent styling across pages.

use crate::domain::Currency;

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-lg bg-sky-500 px-4 py-2 text-sm font-semibold text-white hover:bg-sky-400",
        Currency::Gbp => "rounded-lg bg-emerald-500 px-4 py-2 text-sm font-semibold text-white hover:bg-emerald-400",
        Currency::Usd => "rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400",
    }
}

pub fn btn_active(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-lg px-5 py-2.5 text-sm font-semibold bg-sky-500/20 text-sky-300 border border-sky-500/40",
        Currency::Gbp => "rounded-lg px-5 py-2.5 text-sm font-semibold bg-emerald-500/20 text-emerald-300 border border-emerald-500/40",
        Currency::Usd => "rounded-lg px-5 py-2.5 text-sm font-semibold bg-indigo-500/20 text-indigo-300 border border-indigo-500/40",
    }
}

pub fn btn_inactive(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-lg px-5 py-2.5 text-sm text-slate-400 border border-slate-700 hover:border-sky-600 hover:text-sky-300",
        Currency::Gbp => "rounded-lg px-5 py-2.5 text-sm text-slate-400 border border-slate-700 hover:border-emerald-600 hover:text-emerald-300",
        Currency::Usd => "rounded-lg px-5 py-2.5 text-sm text-slate-400 border border-slate-700 hover:border-indigo-600 hover:text-indigo-300",
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-lg border border-slate-700 bg-slate-950 px-4 py-2.5 text-sm text-slate-100 focus:border-sky-500 focus:outline-none",
        Currency::Gbp => "rounded-lg border border-slate-700 bg-slate-950 px-4 py-2.5 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
        Currency::Usd => "rounded-lg border border-slate-700 bg-slate-950 px-4 py-2.5 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
    }
}

pub fn input_small(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-sky-500 focus:outline-none",
        Currency::Gbp => "rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
        Currency::Usd => "rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
    }
}

// ============================================
// PANEL / TABLE STYLES
// ============================================

pub fn panel_border(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-xl border border-sky-800/50 bg-slate-900/40",
        Currency::Gbp => "rounded-xl border border-emerald-800/50 bg-slate-900/40",
        Currency::Usd => "rounded-xl border border-indigo-800/50 bg-slate-900/40",
    }
}

pub fn table_container(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "rounded-xl border border-sky-900/40 bg-slate-900/40 overflow-hidden",
        Currency::Gbp => "rounded-xl border border-emerald-900/40 bg-slate-900/40 overflow-hidden",
        Currency::Usd => "rounded-xl border border-indigo-900/40 bg-slate-900/40 overflow-hidden",
    }
}

pub fn table_header(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "border-b border-sky-900/40 bg-sky-950/30 text-xs uppercase text-sky-400/70",
        Currency::Gbp => "border-b border-emerald-900/40 bg-emerald-950/30 text-xs uppercase text-emerald-400/70",
        Currency::Usd => "border-b border-indigo-900/40 bg-indigo-950/30 text-xs uppercase text-indigo-400/70",
    }
}

pub fn table_divider(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "divide-y divide-sky-900/30",
        Currency::Gbp => "divide-y divide-emerald-900/30",
        Currency::Usd => "divide-y divide-indigo-900/30",
    }
}

// ============================================
// TEXT STYLES
// ============================================

pub fn text_primary(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "text-sky-300",
        Currency::Gbp => "text-emerald-300",
        Currency::Usd => "text-indigo-300",
    }
}

pub fn text_secondary(_currency: Currency) -> &'static str {
    "text-slate-300"
}

pub fn text_muted(_currency: Currency) -> &'static str {
    "text-slate-500"
}

pub fn label_class(_currency: Currency) -> &'static str {
    "block text-xs font-semibold uppercase text-slate-500"
}

pub fn accent_text(currency: Currency) -> &'static str {
    match currency {
        Currency::Eur => "text-sky-400",
        Currency::Gbp => "text-emerald-400",
        Currency::Usd => "text-indigo-400",
    }
}
