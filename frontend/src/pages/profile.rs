use crate::cache::use_query;
use crate::components::layout::use_user;
use crate::components::media_card::MediaCard;
use crate::telemetry::track_page_view;
use artshare_shared::MediaItem;
use artshare_shared::protocol::GetMedia;
use leptos::prelude::*;

/// The signed-in user's profile: account details plus their own
/// uploads. Edits and deletes performed from the cards below refresh
/// the list through cache invalidation.
#[component]
pub fn ProfilePage() -> impl IntoView {
    track_page_view("Profile");

    let user = use_user();

    // Only the session user's media; the query stays skipped in the
    // window before the user id is available.
    let media = use_query(move || {
        let artist_id = user.get().and_then(|u| u.id)?;
        Some(GetMedia {
            artist_id: Some(artist_id),
            limit: None,
            offset: None,
        })
    });

    let initial = move || {
        user.get()
            .map(|u| u.name.chars().next().unwrap_or('?').to_ascii_uppercase())
            .unwrap_or('?')
            .to_string()
    };

    let upload_count = move || media.data.get().map(|items| items.len()).unwrap_or(0);

    view! {
        <div class="space-y-6">
            <div class="bg-white border rounded-lg p-6 shadow-sm">
                <div class="flex items-center space-x-4">
                    <div class="w-16 h-16 rounded-full bg-indigo-100 text-indigo-700 flex items-center justify-center text-2xl font-semibold">
                        {initial}
                    </div>
                    <div class="flex-1">
                        <h1 class="text-xl font-semibold text-gray-900">
                            {move || user.get().map(|u| u.name).unwrap_or_default()}
                        </h1>
                        <div class="text-sm text-gray-500">
                            {move || user.get().map(|u| u.handle).unwrap_or_default()}
                        </div>
                        <Show when=move || {
                            user.get().and_then(|u| u.artist_type).is_some()
                        }>
                            <div class="mt-1 inline-block px-2 py-0.5 bg-purple-50 text-purple-700 text-xs rounded">
                                {move || {
                                    user.get().and_then(|u| u.artist_type).unwrap_or_default()
                                }}
                            </div>
                        </Show>
                    </div>
                    <div class="text-center">
                        <div class="text-2xl font-semibold text-gray-900">{upload_count}</div>
                        <div class="text-xs text-gray-500">"uploads"</div>
                    </div>
                </div>
                <Show when=move || user.get().and_then(|u| u.email).is_some()>
                    <div class="mt-4 pt-4 border-t text-sm text-gray-600">
                        {move || user.get().and_then(|u| u.email).unwrap_or_default()}
                    </div>
                </Show>
            </div>

            <div class="font-medium text-gray-900">"Your artwork"</div>

            <Show when=move || media.error.get().is_some()>
                <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg p-4">
                    {move || {
                        media.error.get().map(|e| e.user_message()).unwrap_or_default()
                    }}
                </div>
            </Show>

            <Show when=move || media.is_loading.get() && media.data.get().is_none()>
                <div class="text-center text-gray-500 py-8">"Loading your artwork..."</div>
            </Show>

            <Show when=move || {
                media.data.get().map(|items| items.is_empty()).unwrap_or(false)
            }>
                <div class="bg-white border rounded-lg p-8 text-center text-gray-500">
                    "You haven't uploaded anything yet. Share your first piece from the feed!"
                </div>
            </Show>

            <div class="space-y-4">
                <For
                    each=move || media.data.get().unwrap_or_default()
                    key=|item: &MediaItem| item.id.clone()
                    children=move |item: MediaItem| view! { <MediaCard item=item /> }
                />
            </div>
        </div>
    }
}
