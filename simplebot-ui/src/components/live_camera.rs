//! Live Camera Component
//!
//! The robot's video feed with the LIVE badge, the drive pad (manual mode),
//! the connection message and the fullscreen toggle.

use leptos::*;
use simplebot_core::Mode;

use crate::components::DrivePad;
use crate::state::InteractionState;
use crate::transport::VIDEO_ELEMENT_ID;

#[component]
pub fn LiveCamera() -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");

    let container = create_node_ref::<html::Div>();
    let (fullscreen, set_fullscreen) = create_signal(false);

    let toggle_fullscreen = move |_| {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        if document.fullscreen_element().is_none() {
            if let Some(container) = container.get() {
                match container.request_fullscreen() {
                    Ok(()) => set_fullscreen.set(true),
                    Err(e) => web_sys::console::error_1(
                        &format!("Failed to enter fullscreen: {:?}", e).into(),
                    ),
                }
            }
        } else {
            document.exit_fullscreen();
            set_fullscreen.set(false);
        }
    };

    let live = {
        let state = state.clone();
        move || state.read(|session| session.is_live())
    };
    let manual = {
        let state = state.clone();
        move || state.read(|session| session.mode() == Mode::Manual)
    };
    let overlay = move || state.read(|session| session.phase().overlay_text());

    view! {
        <div
            node_ref=container
            class="live-camera-main-container relative flex w-full h-[600px] flex-col justify-center items-center"
        >
            <div class="video-container absolute w-full h-full bg-black rounded-xl flex justify-center">
                <video
                    class="rounded-xl"
                    id=VIDEO_ELEMENT_ID
                    autoplay=true
                    playsinline=true
                    prop:muted=true
                />
            </div>

            <div class={
                let live = live.clone();
                move || {
                    let bg = if live() { "bg-[#D50000]" } else { "bg-[#2e2e2e]" };
                    format!("live-status-container absolute top-[10px] right-[10px] border py-3 px-8 rounded-xl text-white {}", bg)
                }
            }>
                <p>"LIVE"</p>
            </div>

            <Show when=manual>
                <DrivePad />
            </Show>

            {move || {
                if live() {
                    view! {
                        <button
                            on:click=toggle_fullscreen
                            class="absolute bottom-4 right-4 bg-[#D50000] text-white px-4 py-2 rounded shadow-md
                                   hover:bg-white hover:text-[#D50000] transition duration-200 ease-in-out cursor-pointer"
                        >
                            {move || if fullscreen.get() { "Exit Fullscreen" } else { "Fullscreen" }}
                        </button>
                    }.into_view()
                } else {
                    let overlay = overlay.clone();
                    view! {
                        <div class="connection-message-container flex z-[1] text-white">
                            <p class="text-3xl text-center">{overlay}</p>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}
