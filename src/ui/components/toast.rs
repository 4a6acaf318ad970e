use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(5);
const TOAST_QUEUE_LIMIT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let text = message.into();
    toasts.with_mut(|entries| {
        if entries.len() >= TOAST_QUEUE_LIMIT {
            entries.remove(0);
        }
        entries.push(ToastMessage::new(kind, text));
    });
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let views = toasts()
        .into_iter()
        .map(ToastView::from)
        .collect::<Vec<_>>();

    if views.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "pointer-events-none fixed right-4 top-4 z-50 w-80",
            ul {
                class: "space-y-2",
                for view in views {
                    ToastCard { view, toasts: toasts.clone() }
                }
            }
        }
    }
}

#[component]
fn ToastCard(view: ToastView, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toasts_for_timer = toasts.clone();
    let toast_id = view.id.clone();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts_for_timer.clone();
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let class = format!(
        "pointer-events-auto rounded-r-lg border-l-4 bg-slate-900/95 px-4 py-3 shadow-xl {}",
        view.theme
    );
    rsx! {
        li {
            class: class,
            div { class: "flex items-center justify-between",
                span { class: "text-[0.65rem] font-bold uppercase tracking-widest {view.accent}",
                    "{view.label}"
                }
                button {
                    class: "text-slate-500 hover:text-slate-200",
                    onclick: move |_| {
                        let target = view.id.clone();
                        toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                    },
                    "×"
                }
            }
            p { class: "mt-1 text-sm text-slate-200", "{view.text}" }
        }
    }
}

#[derive(Clone, PartialEq)]
struct ToastView {
    id: String,
    text: String,
    theme: &'static str,
    accent: &'static str,
    label: &'static str,
}

impl From<ToastMessage> for ToastView {
    fn from(message: ToastMessage) -> Self {
        let (theme, accent, label) = match message.kind {
            ToastKind::Info => ("border-sky-500", "text-sky-400", "Info"),
            ToastKind::Success => ("border-emerald-500", "text-emerald-400", "Done"),
            ToastKind::Warning => ("border-amber-500", "text-amber-400", "Heads up"),
            ToastKind::Error => ("border-rose-500", "text-rose-400", "Problem"),
        };

        ToastView {
            id: message.id,
            text: message.text,
            theme,
            accent,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_gets_a_distinct_accent_and_label() {
        let kinds = [
            ToastKind::Info,
            ToastKind::Success,
            ToastKind::Warning,
            ToastKind::Error,
        ];
        let views: Vec<ToastView> = kinds
            .iter()
            .map(|kind| ToastView::from(ToastMessage::new(*kind, "msg")))
            .collect();
        for (i, a) in views.iter().enumerate() {
            for b in &views[i + 1..] {
                assert_ne!(a.accent, b.accent);
                assert_ne!(a.label, b.label);
            }
            assert!(!a.id.is_empty());
        }
    }
}
