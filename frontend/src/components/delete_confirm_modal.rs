use crate::cache::use_query_client;
use crate::telemetry::{props, track_event, track_exception};
use artshare_shared::protocol::DeleteMedia;
use artshare_shared::MediaItem;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

/// Confirmation dialog for deleting an owned media item.
#[component]
pub fn DeleteConfirmModal(media: MediaItem, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let client = use_query_client();

    let error_msg = RwSignal::new(Option::<String>::None);
    let deleting = RwSignal::new(false);

    let media_id = media.id.clone();
    let title = media.title.clone();
    let heading_title = media.title.clone();

    let on_confirm = move |_| {
        if deleting.get_untracked() {
            return;
        }
        error_msg.set(None);
        deleting.set(true);

        let mutation = DeleteMedia {
            id: media_id.clone(),
        };
        let deleted_title = title.clone();

        spawn_local(async move {
            match client.mutate(&mutation).await {
                Ok(_) => {
                    track_event(
                        "MediaDelete",
                        props([
                            ("mediaId", json!(mutation.id)),
                            ("title", json!(deleted_title)),
                            ("success", json!(true)),
                        ]),
                    );
                    deleting.set(false);
                    on_close.run(());
                }
                Err(err) => {
                    let message = err.user_message();
                    track_exception(
                        &err.to_string(),
                        props([("action", json!("delete")), ("mediaId", json!(mutation.id))]),
                    );
                    error_msg.set(Some(message));
                    deleting.set(false);
                }
            }
        });
    };

    view! {
        <div class="fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center z-50 p-4">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-md p-6">
                <h2 class="text-lg font-semibold text-gray-900 mb-2">"Delete artwork"</h2>
                <p class="text-sm text-gray-600 mb-4">
                    "Are you sure you want to delete \"" {heading_title}
                    "\"? This cannot be undone."
                </p>
                <Show when=move || error_msg.get().is_some()>
                    <div class="text-red-600 text-sm bg-red-50 p-2 rounded mb-3">
                        {move || error_msg.get().unwrap_or_default()}
                    </div>
                </Show>
                <div class="flex items-center justify-end space-x-2">
                    <button
                        on:click=move |_| on_close.run(())
                        class="px-4 py-2 border border-gray-300 text-gray-700 rounded-md hover:bg-gray-50"
                    >
                        "Cancel"
                    </button>
                    <button
                        on:click=on_confirm
                        disabled=move || deleting.get()
                        class="px-4 py-2 bg-red-600 text-white rounded-md disabled:opacity-60 hover:bg-red-700"
                    >
                        {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
