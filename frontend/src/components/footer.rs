use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="mt-12 py-6 border-t bg-white">
            <div class="max-w-6xl mx-auto px-4 text-sm text-gray-500 text-center">
                "© ArtShare 2025 • Built for independent artists"
            </div>
        </footer>
    }
}
