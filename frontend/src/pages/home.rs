use crate::auth::use_auth;
use crate::telemetry::track_page_view;
use crate::web::router::Link;
use leptos::prelude::*;

/// Public landing page. Reachable signed in or out; the calls to
/// action adapt to the session.
#[component]
pub fn HomePage() -> impl IntoView {
    track_page_view("Home");

    let auth = use_auth();
    let is_authenticated = auth.is_authenticated_signal();

    view! {
        <div class="min-h-screen bg-gradient-to-b from-indigo-50 to-white flex flex-col">
            <div class="flex-1 flex items-center justify-center px-4">
                <div class="max-w-2xl text-center py-16">
                    <div class="text-5xl mb-6">"🎨"</div>
                    <h1 class="text-4xl font-bold text-gray-900 mb-4">"ArtShare"</h1>
                    <p class="text-lg text-gray-600 mb-8">
                        "Showcase your images and short videos, discover other independent artists and build a portfolio that travels with you."
                    </p>
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| {
                            view! {
                                <div class="flex items-center justify-center space-x-4">
                                    <Link
                                        to="/signup"
                                        class="px-6 py-3 bg-indigo-600 text-white rounded-md font-medium hover:bg-indigo-700 transition-colors"
                                    >
                                        "Get started"
                                    </Link>
                                    <Link
                                        to="/login"
                                        class="px-6 py-3 border border-gray-300 text-gray-700 rounded-md font-medium hover:bg-gray-50 transition-colors"
                                    >
                                        "Sign in"
                                    </Link>
                                </div>
                            }
                        }
                    >
                        <Link
                            to="/feed"
                            class="px-6 py-3 bg-indigo-600 text-white rounded-md font-medium hover:bg-indigo-700 transition-colors"
                        >
                            "Go to your feed"
                        </Link>
                    </Show>
                </div>
            </div>
            <footer class="py-6 text-sm text-gray-500 text-center">
                "© ArtShare 2025 • Built for independent artists"
            </footer>
        </div>
    }
}
