//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::Toast;
use crate::pages::{Home, Interaction, Login};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-white text-gray-900 flex flex-col">
                <main class="flex-1">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/home" view=Home />
                        <Route path="/login" view=Login />
                        <Route path="/interaction" view=Interaction />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🤖"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/home"
                class="px-6 py-3 bg-black hover:bg-gray-800 text-white rounded-lg font-medium transition-colors"
            >
                "Back to Simple Robot"
            </A>
        </div>
    }
}
