use crate::auth::{logout, use_auth};
use crate::components::search_box::SearchBox;
use crate::web::router::{Link, use_navigate};
use leptos::prelude::*;

/// Uppercased first letter of the user's name for the avatar disc.
fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();
    let navigate = use_navigate();

    let on_logout = {
        let navigate = navigate.clone();
        move |_| {
            logout(&auth);
            navigate("/");
        }
    };

    view! {
        <header class="bg-white border-b shadow-sm sticky top-0 z-50">
            <div class="max-w-6xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <Link to="/" class="text-2xl font-bold text-indigo-600 hover:text-indigo-700 transition-colors">
                            "ArtShare"
                        </Link>
                        <nav class="hidden md:flex space-x-1">
                            <Link to="/feed" class="px-3 py-2 rounded-md hover:bg-gray-100 text-gray-700 hover:text-indigo-600 transition-colors">
                                "Feed"
                            </Link>
                            <Link to="/explore" class="px-3 py-2 rounded-md hover:bg-gray-100 text-gray-700 hover:text-indigo-600 transition-colors">
                                "Explore"
                            </Link>
                            <Show when=move || user.get().is_some()>
                                <Link to="/profile" class="px-3 py-2 rounded-md hover:bg-gray-100 text-gray-700 hover:text-indigo-600 transition-colors">
                                    "Profile"
                                </Link>
                            </Show>
                        </nav>
                    </div>
                    <div class="flex items-center space-x-4">
                        <SearchBox />
                        <Show
                            when=move || user.get().is_some()
                            fallback=|| view! {
                                <div class="flex items-center space-x-2">
                                    <Link to="/login" class="px-3 py-2 text-gray-700 hover:text-indigo-600 transition-colors">
                                        "Login"
                                    </Link>
                                    <Link to="/signup" class="px-3 py-2 bg-indigo-600 text-white rounded-md hover:bg-indigo-700 transition-colors">
                                        "Sign Up"
                                    </Link>
                                </div>
                            }
                        >
                            <div class="flex items-center space-x-2">
                                <Link to="/feed" class="px-3 py-2 bg-indigo-600 text-white rounded-md hover:bg-indigo-700 transition-colors">
                                    "Upload"
                                </Link>
                                <div class="hidden sm:flex items-center space-x-2">
                                    <div class="w-8 h-8 rounded-full bg-gradient-to-br from-indigo-400 to-purple-500 flex items-center justify-center text-sm font-semibold text-white">
                                        {move || user.get().map(|u| avatar_initial(&u.name)).unwrap_or_default()}
                                    </div>
                                    <div class="text-sm text-gray-700">
                                        {move || user.get().map(|u| u.handle).unwrap_or_default()}
                                    </div>
                                </div>
                                <button
                                    on:click=on_logout.clone()
                                    class="px-3 py-2 text-gray-700 hover:text-indigo-600 transition-colors text-sm"
                                >
                                    "Logout"
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
        </header>
    }
}
