//! Home Page
//!
//! What SimpleBot is, with a button into the interaction page.

use leptos::*;
use leptos_router::*;

#[component]
pub fn Home() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="min-h-screen bg-gray-100 text-gray-900 font-sans">
            <header class="flex justify-between items-center px-8 py-4 bg-white shadow-md sticky top-0 z-50">
                <div class="flex items-center space-x-2">
                    <span class="text-4xl">"🤖"</span>
                    <span class="px-2">"Simple Robot"</span>
                </div>
                <A href="/login" class="px-6 py-2 bg-black text-white rounded-lg hover:bg-gray-800 transition">
                    "Login"
                </A>
            </header>

            <main class="flex flex-col items-center">
                <section class="max-w-4xl w-full my-8 p-6 text-center">
                    <h2 class="text-2xl font-semibold mb-4">"Simple Robot 🤖"</h2>
                    <button
                        on:click=move |_| navigate("/interaction", Default::default())
                        class="px-6 py-2 mb-4 bg-black text-white rounded-lg hover:bg-gray-800 transition"
                    >
                        "Try Robot"
                    </button>
                    <p class="text-justify text-gray-700 leading-relaxed">
                        "SimpleBot is a Raspberry Pi robot that can move, listen and speak. It combines \
                         text-to-speech, speech-to-text and a decision model so it can respond to voice \
                         commands, drive in any direction and be controlled remotely from this page."
                    </p>
                </section>

                <section class="max-w-4xl w-full my-8 p-6">
                    <p class="text-gray-700 text-justify leading-relaxed mb-4">
                        "With a camera, microphone, speaker, ultrasonic sensor and screen, the robot supports \
                         manual driving and lays the groundwork for collision prevention, object detection \
                         and autonomous exploration."
                    </p>
                    <ul class="list-disc list-inside text-gray-700 mb-4 text-left mx-auto max-w-md">
                        <li>"🚗 Drive the robot forward, backward, left or right"</li>
                        <li>"🔍 Ask it to find an object in autonomous mode"</li>
                        <li>"📸 See what the robot sees through its camera"</li>
                        <li>"📝 Follow its decisions in the robot log"</li>
                    </ul>
                </section>
            </main>
        </div>
    }
}
