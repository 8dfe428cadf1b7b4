use crate::cache::use_query;
use crate::components::media_card::MediaCard;
use crate::telemetry::{props, track_event, track_page_view};
use artshare_shared::protocol::{GetTrending, Search};
use artshare_shared::{MediaItem, User};
use leptos::prelude::*;
use serde_json::json;

/// Commit a trending tag as the active search: the box shows the tag
/// and the search query fires without a second submit.
fn select_tag(term: RwSignal<String>, submitted: RwSignal<String>, tag: &str) {
    term.set(tag.to_string());
    submitted.set(tag.to_string());
}

/// Discovery page: trending tags and media, plus full-text search
/// across media and artists. The search query only fires once a term
/// is submitted, not per keystroke; clicking a trending tag fills the
/// box and runs the search in one step.
#[component]
pub fn ExplorePage() -> impl IntoView {
    track_page_view("Explore");

    let term = RwSignal::new(String::new());
    let submitted = RwSignal::new(String::new());

    // Trending is skipped while a search term is active, so the page
    // never holds a subscription it is not rendering.
    let trending = use_query(move || submitted.get().is_empty().then_some(GetTrending));
    let results = use_query(move || {
        let q = submitted.get();
        (!q.is_empty()).then(|| Search { q })
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let q = term.get_untracked().trim().to_string();
        if !q.is_empty() {
            track_event("Search", props([("query", json!(q))]));
        }
        submitted.set(q);
    };

    let searching = move || !submitted.get().is_empty();

    view! {
        <div class="space-y-6">
            <form on:submit=on_search class="flex items-center space-x-2">
                <input
                    type="text"
                    placeholder="Search artists, tags, titles..."
                    class="flex-1 p-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500"
                    on:input=move |ev| term.set(event_target_value(&ev))
                    prop:value=term
                />
                <button
                    type="submit"
                    class="px-4 py-2 bg-indigo-600 text-white rounded-md hover:bg-indigo-700 transition-colors"
                >
                    "Search"
                </button>
            </form>

            // Search results replace the trending view while a term is
            // active.
            <Show
                when=searching
                fallback=move || {
                    view! {
                        <div class="space-y-6">
                            <div class="bg-white border rounded-lg p-4 shadow-sm">
                                <div class="font-medium text-gray-900 mb-3">"Trending tags"</div>
                                <Show
                                    when=move || {
                                        trending
                                            .data
                                            .get()
                                            .map(|t| !t.tags.is_empty())
                                            .unwrap_or(false)
                                    }
                                    fallback=move || {
                                        view! {
                                            <div class="text-sm text-gray-500">
                                                {move || {
                                                    if trending.is_loading.get() {
                                                        "Loading..."
                                                    } else {
                                                        "Nothing trending yet."
                                                    }
                                                }}
                                            </div>
                                        }
                                    }
                                >
                                    <div class="flex flex-wrap gap-2">
                                        <For
                                            each=move || {
                                                trending.data.get().map(|t| t.tags).unwrap_or_default()
                                            }
                                            key=|tag: &String| tag.clone()
                                            children=move |tag: String| {
                                                let label = tag.clone();
                                                view! {
                                                    <button
                                                        on:click=move |_| select_tag(term, submitted, &tag)
                                                        class="px-3 py-1 bg-indigo-50 text-indigo-700 text-sm rounded-full hover:bg-indigo-100 transition-colors"
                                                    >
                                                        "#" {label}
                                                    </button>
                                                }
                                            }
                                        />
                                    </div>
                                </Show>
                            </div>

                            <Show when=move || trending.error.get().is_some()>
                                <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg p-4">
                                    {move || {
                                        trending
                                            .error
                                            .get()
                                            .map(|e| e.user_message())
                                            .unwrap_or_default()
                                    }}
                                </div>
                            </Show>

                            <div class="space-y-4">
                                <For
                                    each=move || {
                                        trending.data.get().map(|t| t.media).unwrap_or_default()
                                    }
                                    key=|item: &MediaItem| item.id.clone()
                                    children=move |item: MediaItem| view! { <MediaCard item=item /> }
                                />
                            </div>
                        </div>
                    }
                }
            >
                <div class="space-y-6">
                    <Show when=move || results.is_loading.get()>
                        <div class="text-center text-gray-500 py-4">"Searching..."</div>
                    </Show>

                    <Show when=move || results.error.get().is_some()>
                        <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg p-4">
                            {move || {
                                results.error.get().map(|e| e.user_message()).unwrap_or_default()
                            }}
                        </div>
                    </Show>

                    <Show when=move || {
                        results
                            .data
                            .get()
                            .map(|r| !r.users.is_empty())
                            .unwrap_or(false)
                    }>
                        <div class="bg-white border rounded-lg p-4 shadow-sm">
                            <div class="font-medium text-gray-900 mb-3">"Artists"</div>
                            <div class="space-y-2">
                                <For
                                    each=move || {
                                        results.data.get().map(|r| r.users).unwrap_or_default()
                                    }
                                    key=|user: &User| user.id.clone().unwrap_or_default()
                                    children=move |user: User| {
                                        view! {
                                            <div class="flex items-center space-x-3 p-2 hover:bg-gray-50 rounded">
                                                <div class="w-8 h-8 rounded-full bg-indigo-100 text-indigo-700 flex items-center justify-center text-sm font-medium">
                                                    {user.name.chars().next().unwrap_or('?').to_string()}
                                                </div>
                                                <div>
                                                    <div class="text-sm font-medium text-gray-900">
                                                        {user.name.clone()}
                                                    </div>
                                                    <div class="text-xs text-gray-500">{user.handle.clone()}</div>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </div>
                    </Show>

                    <Show when=move || {
                        results
                            .data
                            .get()
                            .map(|r| r.media.is_empty() && r.users.is_empty())
                            .unwrap_or(false)
                    }>
                        <div class="bg-white border rounded-lg p-8 text-center text-gray-500">
                            "No results for \"" {move || submitted.get()} "\""
                        </div>
                    </Show>

                    <div class="space-y-4">
                        <For
                            each=move || results.data.get().map(|r| r.media).unwrap_or_default()
                            key=|item: &MediaItem| item.id.clone()
                            children=move |item: MediaItem| view! { <MediaCard item=item /> }
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_click_fills_the_box_and_runs_the_search() {
        let term = RwSignal::new(String::new());
        let submitted = RwSignal::new(String::new());

        select_tag(term, submitted, "abstract");

        assert_eq!(term.get_untracked(), "abstract");
        assert_eq!(submitted.get_untracked(), "abstract");
    }
}
