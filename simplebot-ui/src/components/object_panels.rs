//! Object Panels Component
//!
//! "Nearest Object" and "Objects Found" panels. Both only show detections
//! in autonomous mode.

use leptos::*;

use crate::state::InteractionState;

#[component]
pub fn ObjectPanels() -> impl IntoView {
    let state = use_context::<InteractionState>().expect("InteractionState not found");

    let nearest = {
        let state = state.clone();
        move || state.read(|session| session.nearest_object_text())
    };
    let found = move || state.read(|session| session.objects_found_text());

    view! {
        <div class="text-xl text-center p-2">
            <p>"Nearest Object"</p>
        </div>
        <div class="nearest-object-main-container flex flex-[0.5] border px-2 py-2 shadow-md overflow-auto">
            <p>{nearest}</p>
        </div>
        <div class="text-xl text-center p-2">
            <p>"Objects Found"</p>
        </div>
        <div class="all-objects-main-container flex flex-[0.7] border rounded-b-md px-2 py-2 shadow-md
                    overflow-auto whitespace-pre">
            <p>{found}</p>
        </div>
    }
}
