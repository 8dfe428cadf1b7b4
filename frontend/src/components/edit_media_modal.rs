use crate::cache::use_query_client;
use crate::telemetry::{props, track_event, track_exception};
use artshare_shared::parse_tags;
use artshare_shared::protocol::{MediaUpdates, UpdateMedia};
use artshare_shared::{MediaItem, Visibility};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

/// Modal for editing an owned media item's metadata. On a failed save
/// the form keeps its values and shows the server's error verbatim.
#[component]
pub fn EditMediaModal(media: MediaItem, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let client = use_query_client();

    let title = RwSignal::new(media.title.clone());
    let description = RwSignal::new(media.description.clone());
    let tags = RwSignal::new(media.tags.join(", "));
    let visibility = RwSignal::new(media.visibility);
    let error_msg = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let media_id = media.id.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        error_msg.set(None);
        submitting.set(true);

        let mutation = UpdateMedia {
            id: media_id.clone(),
            updates: MediaUpdates {
                title: title.get_untracked(),
                description: description.get_untracked(),
                tags: parse_tags(&tags.get_untracked()),
                visibility: visibility.get_untracked(),
            },
        };

        spawn_local(async move {
            match client.mutate(&mutation).await {
                Ok(updated) => {
                    track_event(
                        "MediaUpdate",
                        props([
                            ("mediaId", json!(updated.id)),
                            ("title", json!(updated.title)),
                            ("success", json!(true)),
                        ]),
                    );
                    submitting.set(false);
                    on_close.run(());
                }
                Err(err) => {
                    let message = err.user_message();
                    track_exception(
                        &err.to_string(),
                        props([("action", json!("update")), ("mediaId", json!(mutation.id))]),
                    );
                    error_msg.set(Some(message));
                    submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center z-50 p-4">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-lg p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-lg font-semibold text-gray-900">"Edit artwork"</h2>
                    <button
                        on:click=move |_| on_close.run(())
                        class="text-gray-400 hover:text-gray-600"
                        title="Close"
                    >
                        "✕"
                    </button>
                </div>
                <form on:submit=on_submit class="space-y-3">
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Title"</label>
                        <input
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            on:input=move |ev| title.set(event_target_value(&ev))
                            prop:value=title
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Description"</label>
                        <textarea
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500 resize-none"
                            rows="3"
                            on:input=move |ev| description.set(event_target_value(&ev))
                            prop:value=description
                        ></textarea>
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Tags"</label>
                        <input
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                            placeholder="Comma separated"
                            on:input=move |ev| tags.set(event_target_value(&ev))
                            prop:value=tags
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Visibility"</label>
                        <select
                            class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500 bg-white"
                            on:change=move |ev| {
                                visibility
                                    .set(
                                        match event_target_value(&ev).as_str() {
                                            "private" => Visibility::Private,
                                            _ => Visibility::Public,
                                        },
                                    )
                            }
                        >
                            <option value="public" selected=move || visibility.get() == Visibility::Public>
                                "Public"
                            </option>
                            <option value="private" selected=move || visibility.get() == Visibility::Private>
                                "Private"
                            </option>
                        </select>
                    </div>
                    <Show when=move || error_msg.get().is_some()>
                        <div class="text-red-600 text-sm bg-red-50 p-2 rounded">
                            {move || error_msg.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <div class="flex items-center justify-end space-x-2 pt-2">
                        <button
                            type="button"
                            on:click=move |_| on_close.run(())
                            class="px-4 py-2 border border-gray-300 text-gray-700 rounded-md hover:bg-gray-50"
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="px-4 py-2 bg-indigo-600 text-white rounded-md disabled:opacity-60 hover:bg-indigo-700"
                        >
                            {move || if submitting.get() { "Saving..." } else { "Save changes" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
