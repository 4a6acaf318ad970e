use dioxus::prelude::*;

use crate::domain::Currency;
use crate::ui::theme;

/// One display row of the normalized cost table. Formatting happens in the
/// page layer; absent figures arrive as `None` and render as "not set" /
/// "n/a" so they can never be mistaken for zero cost.
#[derive(Clone, Debug, PartialEq)]
pub struct CostRow {
    pub size_area: u32,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub listed: Option<String>,
    pub current_profit: Option<String>,
}

#[component]
pub fn CostTable(
    rows: Vec<CostRow>,
    currency: Currency,
    editing: Option<u32>,
    edit_value: String,
    on_edit_start: EventHandler<u32>,
    on_edit_change: EventHandler<String>,
    on_edit_save: EventHandler<()>,
    on_edit_cancel: EventHandler<()>,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { class: "{theme::panel_border(currency)} p-6 text-sm text-slate-400",
                "No cost data loaded yet. Point Settings at your cost workbook."
            }
        };
    }

    rsx! {
        div { class: "{theme::table_container(currency)}",
            table { class: "w-full text-left text-sm",
                thead {
                    tr { class: "{theme::table_header(currency)}",
                        th { class: "px-4 py-3", "Size (cm²)" }
                        th { class: "px-4 py-3", "Primary lab" }
                        th { class: "px-4 py-3", "Secondary lab" }
                        th { class: "px-4 py-3", "Listed price" }
                        th { class: "px-4 py-3", "Current profit" }
                        th { class: "px-4 py-3 text-right", "" }
                    }
                }
                tbody { class: "{theme::table_divider(currency)}",
                    for row in rows {
                        tr { class: "hover:bg-slate-900/60",
                            td { class: "px-4 py-3 font-semibold {theme::text_secondary(currency)}", "{row.size_area}" }
                            td { class: "px-4 py-3", CellValue { value: row.primary.clone(), absent: "not priced" } }
                            td { class: "px-4 py-3", CellValue { value: row.secondary.clone(), absent: "not priced" } }
                            if editing == Some(row.size_area) {
                                td { class: "px-4 py-3", colspan: 2,
                                    form {
                                        class: "flex items-center gap-2",
                                        onsubmit: move |evt| {
                                            evt.prevent_default();
                                            on_edit_save.call(());
                                        },
                                        input {
                                            class: "w-24 {theme::input_small(currency)}",
                                            value: "{edit_value}",
                                            oninput: move |evt| on_edit_change.call(evt.value()),
                                        }
                                        button {
                                            class: "{theme::btn_primary(currency)}",
                                            r#type: "submit",
                                            "Save"
                                        }
                                        button {
                                            class: "text-xs uppercase text-slate-400 hover:text-slate-200",
                                            r#type: "button",
                                            onclick: move |_| on_edit_cancel.call(()),
                                            "Cancel"
                                        }
                                    }
                                }
                            } else {
                                td { class: "px-4 py-3", CellValue { value: row.listed.clone(), absent: "not set" } }
                                td { class: "px-4 py-3", CellValue { value: row.current_profit.clone(), absent: "n/a" } }
                            }
                            td { class: "px-4 py-3 text-right",
                                if editing != Some(row.size_area) {
                                    button {
                                        class: "text-xs font-semibold uppercase tracking-wide {theme::accent_text(currency)} hover:underline",
                                        onclick: move |_| on_edit_start.call(row.size_area),
                                        "Edit listing"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CellValue(value: Option<String>, absent: &'static str) -> Element {
    match value {
        Some(text) => rsx! { span { class: "text-slate-200", "{text}" } },
        None => rsx! { span { class: "text-xs italic text-slate-500", "{absent}" } },
    }
}
