//! Connection Bar Component
//!
//! Connection status, the exploration-mode toggle and the Connect and
//! Disconnect buttons.

use leptos::*;
use simplebot_core::Mode;

use crate::state::InteractionState;

#[component]
pub fn ConnectionBar() -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");

    let status = {
        let state = state.clone();
        move || state.read(|session| session.display_status())
    };
    let status_for_color = status.clone();

    let connect = {
        let state = state.clone();
        move |_| state.connect()
    };
    let disconnect = move |_| state.disconnect();

    view! {
        <div class="connect-disconnect-main-container flex flex-col lg:flex-row">
            <div class="connection-strength-container flex flex-row flex-1 text-xl">
                <p class="whitespace-pre">"Robot Connection : "</p>
                <p style=move || format!("color: {}", status_for_color().color())>
                    {move || status().label()}
                </p>
            </div>
            <div class="p-3" />
            <div class="connect-disconnect-btn-container flex flex-col lg:flex-row">
                <ModeToggle />
                <span class="p-2" />
                <button
                    class="border bg-[#00ad2e] text-white p-2 px-5 text-xl rounded-md cursor-pointer
                           hover:bg-white hover:text-[#00ad2e] transition duration-200 ease-in-out shadow-md"
                    on:click=connect
                >
                    "Connect"
                </button>
                <span class="p-1" />
                <button
                    class="border bg-[#D50000] text-white p-2 px-5 text-xl rounded-md cursor-pointer
                           hover:bg-white hover:text-[#D50000] transition duration-200 ease-in-out shadow-md"
                    on:click=disconnect
                >
                    "Disconnect"
                </button>
            </div>
        </div>
    }
}

/// Shows the current mode; hovering offers to change it
#[component]
fn ModeToggle() -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");
    let (hovering, set_hovering) = create_signal(false);

    let label = {
        let state = state.clone();
        move || {
            if hovering.get() {
                return "Change Mode?";
            }
            match state.read(|session| session.mode()) {
                Mode::Manual => "Manual Exploration",
                Mode::Autonomous => "Autonomous Exploration",
            }
        }
    };

    view! {
        <button
            class="border text-black lg:w-[267px] p-2 px-5 text-xl rounded-md cursor-pointer
                   hover:bg-white hover:text-[#5496ff] transition duration-200 ease-in-out shadow-md"
            on:mouseenter=move |_| set_hovering.set(true)
            on:mouseleave=move |_| set_hovering.set(false)
            on:click=move |_| state.toggle_mode()
        >
            {label}
        </button>
    }
}
