use crate::auth::{set_credentials, use_auth};
use crate::cache::use_query_client;
use crate::telemetry::{now_ms, props, track_event, track_exception, track_page_view};
use crate::web::router::Link;
use artshare_shared::protocol::Login;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

/// Sign-in page. On success the stored session flips the router's
/// auth signal, which redirects to the feed; this page never navigates
/// itself.
#[component]
pub fn LoginPage() -> impl IntoView {
    track_page_view("Login");

    let auth = use_auth();
    let client = use_query_client();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_msg = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        error_msg.set(None);
        submitting.set(true);

        let mutation = Login {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let started = now_ms();

        spawn_local(async move {
            let outcome = client.mutate(&mutation).await;
            let duration = now_ms() - started;

            match outcome {
                Ok(response) => {
                    track_event(
                        "UserLogin",
                        props([
                            ("userId", json!(response.user.id.clone())),
                            ("duration", json!(duration)),
                            ("success", json!(true)),
                        ]),
                    );
                    set_credentials(&auth, response.user, response.token);
                }
                Err(err) => {
                    let message = err.user_message();
                    track_event(
                        "UserLogin",
                        props([
                            ("duration", json!(duration)),
                            ("success", json!(false)),
                            ("error", json!(message)),
                        ]),
                    );
                    track_exception(&err.to_string(), props([("action", json!("login"))]));
                    error_msg.set(Some(message));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <div class="bg-white border rounded-lg shadow-sm w-full max-w-md p-8">
                <div class="text-center mb-6">
                    <div class="text-3xl mb-2">"🎨"</div>
                    <h1 class="text-2xl font-bold text-gray-900">"Welcome back"</h1>
                    <p class="text-sm text-gray-500 mt-1">"Sign in to your ArtShare account"</p>
                </div>
                <form on:submit=on_submit class="space-y-4">
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
                        {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <div class="mt-6 text-sm text-gray-600 text-center">
                    "Don't have an account? "
                    <Link to="/signup" class="text-indigo-600 hover:underline">
                        "Sign up"
                    </Link>
                </div>
            </div>
        </div>
    }
}
