//! Toast Notifications
//!
//! Stacks the session's notices in the bottom-right corner. Clicking a
//! toast closes it early.

use leptos::*;
use simplebot_core::Notice;

use crate::state::global::{GlobalState, ShownNotice};

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let notices = state.notices;

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2">
            <For
                each=move || notices.with(|queue| queue.shown().to_vec())
                key=|shown| shown.id
                children=move |shown: ShownNotice| {
                    let state = state.clone();
                    view! { <NoticeToast shown=shown on_close=move |id: u64| state.dismiss(id) /> }
                }
            />
        </div>
    }
}

#[component]
fn NoticeToast(shown: ShownNotice, #[prop(into)] on_close: Callback<u64>) -> impl IntoView {
    let id = shown.id;
    let (icon, bg_class) = match shown.notice {
        Notice::Success(_) => ("✓", "bg-green-600"),
        Notice::Error(_) => ("✕", "bg-red-600"),
    };
    let message = shown.notice.message().to_string();

    view! {
        <div
            role="status"
            on:click=move |_| on_close.call(id)
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg cursor-pointer animate-slide-in",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
