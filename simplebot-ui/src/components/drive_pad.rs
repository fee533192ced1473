//! Drive Pad Component
//!
//! On-screen W/A/S/D buttons. Holding a button drives once; the robot gets
//! a new command only after release and a fresh press.

use leptos::*;
use simplebot_core::{key_label, Direction};

use crate::state::InteractionState;

/// Cross-shaped drive pad overlaid on the video
#[component]
pub fn DrivePad() -> impl IntoView {
    view! {
        <div class="robot-movement-commands-container absolute bottom-[10px] left-[10px] flex flex-col
                    items-center text-white bg-[#2e2e2e] text-3xl p-2 rounded-xl shadow-md">
            <DriveButton direction=Direction::Front nudge="-translate-y-1" />
            <div class="flex flex-row">
                <DriveButton direction=Direction::Left nudge="-translate-x-1" />
                <div class="w-[50px]" />
                <DriveButton direction=Direction::Right nudge="translate-x-1" />
            </div>
            <DriveButton direction=Direction::Back nudge="translate-y-1" />
        </div>
    }
}

#[component]
fn DriveButton(direction: Direction, nudge: &'static str) -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");

    let pressed = {
        let state = state.clone();
        move || state.read(|session| session.is_pressed(direction))
    };
    let press = {
        let state = state.clone();
        move |_| state.press(direction)
    };
    let release = {
        let state = state.clone();
        move |_| state.release(direction)
    };
    let leave = move |_| state.release(direction);

    view! {
        <button
            class=move || {
                let base = "p-2 border rounded-md w-[50px] h-[50px] hover:bg-white hover:text-black \
                            ease-in-out transition duration-100 cursor-pointer shadow-md";
                if pressed() {
                    format!("{} scale-95 transform {} bg-white text-black", base, nudge)
                } else {
                    format!("{} scale-100", base)
                }
            }
            on:mousedown=press
            on:mouseup=release
            on:mouseleave=leave
        >
            {key_label(direction)}
        </button>
    }
}
