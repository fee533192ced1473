//! Command Bar Component
//!
//! Free-text "find" requests for autonomous mode. Typing here turns off
//! keyboard driving until the box loses focus.

use leptos::*;
use simplebot_core::Mode;

use crate::state::InteractionState;

#[component]
pub fn CommandBar() -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");
    let (send_pressed, set_send_pressed) = create_signal(false);

    let autonomous = {
        let state = state.clone();
        move || state.read(|session| session.mode() == Mode::Autonomous)
    };
    let text = {
        let state = state.clone();
        move || state.read(|session| session.command_text().to_string())
    };
    let placeholder = {
        let autonomous = autonomous.clone();
        move || {
            if autonomous() {
                "Type your robot commands here"
            } else {
                "Switch to autonomous mode to use robot commands"
            }
        }
    };

    let on_input = {
        let state = state.clone();
        move |ev| state.set_command_text(event_target_value(&ev))
    };
    let on_focus = {
        let state = state.clone();
        move |_| state.set_text_focus(true)
    };
    let on_blur = {
        let state = state.clone();
        move |_| state.set_text_focus(false)
    };
    let on_send = move |_| state.submit_find();

    view! {
        <div class="command-bar-main-container flex flex-1 border rounded-md relative">
            <textarea
                class="bg-white px-2 w-full rounded-md m-1 p-2"
                name="textCommand"
                prop:value=text
                placeholder=placeholder
                on:input=on_input
                on:focus=on_focus
                on:blur=on_blur
            />
            <Show when=autonomous>
                <button
                    class=move || format!(
                        "absolute right-[4px] bottom-[4px] bg-[#2e2e2e] p-2 px-4 text-white rounded-md \
                         cursor-pointer hover:bg-white hover:text-black border transition ease-in-out \
                         duration-100 {}",
                        if send_pressed.get() { "scale-90" } else { "scale-100" }
                    )
                    on:mousedown=move |_| set_send_pressed.set(true)
                    on:mouseup=move |_| set_send_pressed.set(false)
                    on:mouseleave=move |_| set_send_pressed.set(false)
                    on:click=on_send.clone()
                >
                    "Send"
                </button>
            </Show>
        </div>
    }
}
