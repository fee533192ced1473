//! Login Page
//!
//! Robot login. Blank fields are refused before anything is sent; server
//! errors show under the form.

use leptos::*;
use leptos_router::*;
use simplebot_core::{submit_login, LoginForm};

use crate::api::HttpLogin;
use crate::components::InlineLoading;
use crate::state::global::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = LoginForm::new(name.get_untracked(), password.get_untracked());
        let state = state.clone();
        let navigate = navigate.clone();
        set_submitting.set(true);

        spawn_local(async move {
            match submit_login(&HttpLogin, &form).await {
                Ok(handoff) => {
                    set_error.set(None);
                    set_password.set(String::new());
                    state.show_success(&format!("Welcome, {}!", handoff.name));
                    state.handoff.set(Some(handoff));
                    navigate("/interaction", Default::default());
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <form
                on:submit=on_submit
                class="bg-white p-6 rounded-lg shadow-md w-80 flex flex-col gap-4"
            >
                <h2 class="text-center text-xl font-semibold text-gray-800">"Robot Login"</h2>

                <input
                    type="text"
                    placeholder="Your Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="border p-2 rounded focus:outline-none focus:ring-2 focus:ring-blue-400"
                />

                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="border p-2 rounded focus:outline-none focus:ring-2 focus:ring-blue-400"
                />

                {move || error.get().map(|message| view! {
                    <p class="text-red-500 text-sm text-center">{message}</p>
                })}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white rounded py-2 transition
                           flex items-center justify-center space-x-2"
                >
                    <Show when=move || submitting.get()>
                        <InlineLoading />
                    </Show>
                    <span>"Login"</span>
                </button>
            </form>
        </div>
    }
}
