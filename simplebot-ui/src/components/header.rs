//! Header Component
//!
//! Brand bar shown on the interaction page.

use leptos::*;
use leptos_router::*;

/// Page header; the logo leads back to the home page
#[component]
pub fn Header(
    /// Name of the logged-in operator, if any
    #[prop(into, optional)]
    operator: MaybeSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="header-container flex items-center justify-center border-b shadow-md py-3">
            <A href="/home" class="flex items-center space-x-3 cursor-pointer">
                <span class="text-5xl">"🤖"</span>
                <span class="text-3xl">"Simple Robot"</span>
            </A>
            {move || operator.get().map(|name| view! {
                <span class="ml-6 text-gray-500">{format!("Operator: {}", name)}</span>
            })}
        </div>
    }
}
