use crate::cache::use_query;
use crate::components::media_card::MediaCard;
use crate::components::upload_card::UploadCard;
use crate::telemetry::{props, track_event, track_page_view};
use artshare_shared::MediaItem;
use artshare_shared::protocol::GetMedia;
use leptos::prelude::*;
use serde_json::json;

const FEED_PAGE_SIZE: u32 = 50;

/// Main feed: upload form on top, newest media below. A mutation
/// anywhere in the app that touches media re-runs this query through
/// the cache, so the list stays current without manual reloads.
#[component]
pub fn FeedPage() -> impl IntoView {
    track_page_view("Feed");

    let media = use_query(|| {
        Some(GetMedia {
            artist_id: None,
            limit: Some(FEED_PAGE_SIZE),
            offset: None,
        })
    });

    // Fires on the initial load and again after every invalidation-
    // driven refetch.
    Effect::new(move |_| {
        if let Some(items) = media.data.get() {
            track_event("MediaFetch", props([("count", json!(items.len()))]));
        }
    });

    view! {
        <div class="space-y-6">
            <UploadCard />

            <Show when=move || media.error.get().is_some()>
                <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg p-4">
                    {move || {
                        media.error.get().map(|e| e.user_message()).unwrap_or_default()
                    }}
                </div>
            </Show>

            <Show when=move || media.is_loading.get() && media.data.get().is_none()>
                <div class="text-center text-gray-500 py-12">"Loading feed..."</div>
            </Show>

            <Show when=move || {
                media.data.get().map(|items| items.is_empty()).unwrap_or(false)
            }>
                <div class="bg-white border rounded-lg p-8 text-center text-gray-500">
                    "No artwork yet. Be the first to share something!"
                </div>
            </Show>

            <For
                each=move || media.data.get().unwrap_or_default()
                key=|item: &MediaItem| item.id.clone()
                children=move |item: MediaItem| view! { <MediaCard item=item /> }
            />
        </div>
    }
}
