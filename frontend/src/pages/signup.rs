use crate::auth::{set_credentials, use_auth};
use crate::cache::use_query_client;
use crate::telemetry::{props, track_event, track_exception, track_page_view};
use crate::web::router::Link;
use artshare_shared::protocol::Register;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

const ARTIST_TYPES: [&str; 6] = [
    "Painter",
    "Illustrator",
    "Photographer",
    "Sculptor",
    "Digital Artist",
    "Mixed Media",
];

/// Registration page. A successful registration signs the user in
/// directly with the returned token.
#[component]
pub fn SignupPage() -> impl IntoView {
    track_page_view("Signup");

    let auth = use_auth();
    let client = use_query_client();

    let name = RwSignal::new(String::new());
    let handle = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let artist_type = RwSignal::new(String::new());
    let error_msg = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        // Client-side check: mismatched passwords never reach the
        // network.
        if password.get_untracked() != confirm.get_untracked() {
            error_msg.set(Some("Passwords do not match.".to_string()));
            return;
        }

        error_msg.set(None);
        submitting.set(true);

        let chosen_type = artist_type.get_untracked();
        let mutation = Register {
            name: name.get_untracked(),
            handle: handle.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            artist_type: (!chosen_type.is_empty()).then_some(chosen_type),
        };

        spawn_local(async move {
            match client.mutate(&mutation).await {
                Ok(response) => {
                    track_event(
                        "UserRegister",
                        props([
                            ("userId", json!(response.user.id.clone())),
                            ("artistType", json!(response.user.artist_type.clone())),
                            ("success", json!(true)),
                        ]),
                    );
                    set_credentials(&auth, response.user, response.token);
                }
                Err(err) => {
                    let message = err.user_message();
                    track_event(
                        "UserRegister",
                        props([("success", json!(false)), ("error", json!(message))]),
                    );
                    track_exception(&err.to_string(), props([("action", json!("register"))]));
                    error_msg.set(Some(message));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4 py-8">
            <div class="bg-white border rounded-lg shadow-sm w-full max-w-md p-8">
                <div class="text-center mb-6">
                    <div class="text-3xl mb-2">"🎨"</div>
                    <h1 class="text-2xl font-bold text-gray-900">"Join ArtShare"</h1>
                    <p class="text-sm text-gray-500 mt-1">"Create your artist account"</p>
                </div>
                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Name"</label>
                        <input
                            required
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            on:input=move |ev| name.set(event_target_value(&ev))
                            prop:value=name
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Handle"</label>
                        <input
                            required
                            placeholder="@yourhandle"
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            on:input=move |ev| handle.set(event_target_value(&ev))
                            prop:value=handle
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Email"</label>
                        <input
                            type="email"
                            required
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            on:input=move |ev| email.set(event_target_value(&ev))
                            prop:value=email
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Password"</label>
                        <input
                            type="password"
                            required
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            on:input=move |ev| password.set(event_target_value(&ev))
                            prop:value=password
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">
                            "Confirm password"
                        </label>
                        <input
                            type="password"
                            required
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                            prop:value=confirm
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">
                            "Artist type (optional)"
                        </label>
                        <select
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500 bg-white"
                            on:change=move |ev| artist_type.set(event_target_value(&ev))
                        >
                            <option value="">"Select a type"</option>
                            {ARTIST_TYPES
                                .iter()
                                .map(|t| view! { <option value=*t>{*t}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <Show when=move || error_msg.get().is_some()>
                        <div class="text-red-600 text-sm bg-red-50 p-2 rounded">
                            {move || error_msg.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full py-2 bg-indigo-600 text-white rounded-md disabled:opacity-60 hover:bg-indigo-700 transition-colors"
                    >
                        {move || if submitting.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <div class="mt-6 text-sm text-gray-600 text-center">
                    "Already have an account? "
                    <Link to="/login" class="text-indigo-600 hover:underline">
                        "Sign in"
                    </Link>
                </div>
            </div>
        </div>
    }
}
