//! Interaction Page
//!
//! Live video, driving, the robot log and the connection controls. The
//! page owns one [`InteractionState`]; leaving the page terminates the
//! streaming client.

use leptos::*;

use crate::components::{CommandBar, ConnectionBar, Header, LiveCamera, ObjectPanels, RobotLog};
use crate::state::global::GlobalState;
use crate::state::InteractionState;

#[component]
pub fn Interaction() -> impl IntoView {
    let global = use_context::<GlobalState>().expect("GlobalState not found");

    let state = InteractionState::new(global.clone());
    provide_context(state.clone());
    state.load_stream_config();

    // Keyboard driving
    let keydown = {
        let state = state.clone();
        window_event_listener(ev::keydown, move |ev| state.press_key(&ev.key()))
    };
    let keyup = {
        let state = state.clone();
        window_event_listener(ev::keyup, move |ev| state.release_key(&ev.key()))
    };

    on_cleanup(move || {
        keydown.remove();
        keyup.remove();
        state.shutdown();
    });

    let handoff = global.handoff;
    let operator = Signal::derive(move || handoff.get().map(|h| h.name));
    let stream_url = move || handoff.get().and_then(|h| h.stream_url);

    view! {
        <Header operator=operator />
        <div class="interaction-body-container flex flex-col p-5 sm:px-10 2xl:px-40">
            {move || stream_url().map(|url| view! {
                <p class="text-sm text-gray-500 mb-2">
                    "Stream: " <a class="underline" href=url.clone() target="_blank">{url.clone()}</a>
                </p>
            })}
            <div class="live-camera-feed-container flex flex-col lg:flex-row">
                <div class="live-camera-container flex flex-[2.3] shadow-md rounded-xl">
                    <LiveCamera />
                </div>
                <div class="p-3" />
                <div class="flex flex-col lg:flex-1 border shadow-md rounded-xl p-4 h-[550px] lg:h-[600px]">
                    <RobotLog />
                    <ObjectPanels />
                    <div class="p-2" />
                    <CommandBar />
                </div>
            </div>
            <div class="p-3" />
            <ConnectionBar />
        </div>
    }
}
