//! Robot Log Component
//!
//! Timestamped lines from the page and the robot, newest at the bottom.

use leptos::*;

use crate::state::InteractionState;

#[component]
pub fn RobotLog() -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");
    let log_ref = create_node_ref::<html::Div>();

    // Keep the newest line in view
    let state_for_scroll = state.clone();
    create_effect(move |_| {
        state_for_scroll.read(|session| session.log().len());
        request_animation_frame(move || {
            if let Some(container) = log_ref.get_untracked() {
                container.set_scroll_top(container.scroll_height());
            }
        });
    });

    let lines = move || {
        state
            .read(|session| session.log().iter().map(ToString::to_string).collect::<Vec<_>>())
            .into_iter()
            .map(|line| view! { <p>{line}</p> })
            .collect_view()
    };

    view! {
        <div class="text-xl text-center mb-2">
            <p>"Robot Log"</p>
        </div>
        <div
            node_ref=log_ref
            class="live-feed-main-container flex flex-[2] flex-col border rounded-t-md p-2 overflow-auto shadow-md"
        >
            <div class="live-feed-text">{lines}</div>
        </div>
    }
}
