use crate::cache::use_query_client;
use crate::components::layout::use_user;
use crate::telemetry::{now_ms, props, track_event, track_exception, track_metric};
use artshare_shared::parse_tags;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

/// Inline upload form at the top of the feed.
///
/// Validation failures (no file chosen) are reported inline without a
/// network call; a failed upload surfaces the server's error verbatim
/// and keeps the entered fields so the user can retry.
#[component]
pub fn UploadCard() -> impl IntoView {
    let client = use_query_client();
    let user = use_user();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let tags = RwSignal::new(String::new());
    // web_sys::File is not thread-safe, so the picked file lives in a
    // local-storage signal.
    let file = RwSignal::new_local(None::<web_sys::File>);
    let error_msg = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let user_id = move || {
        user.get_untracked()
            .and_then(|u| u.id)
            .unwrap_or_default()
    };

    let on_file = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let picked = input.files().and_then(|list| list.get(0));
        if let Some(f) = &picked {
            track_event(
                "MediaFileSelected",
                props([
                    ("fileName", json!(f.name())),
                    ("fileSize", json!(f.size())),
                    ("fileType", json!(f.type_())),
                    ("userId", json!(user_id())),
                ]),
            );
        }
        file.set(picked);
    };

    let on_publish = move |_| {
        let Some(picked) = file.get_untracked() else {
            error_msg.set(Some("Please choose an image or video file.".to_string()));
            return;
        };

        error_msg.set(None);
        submitting.set(true);

        let started = now_ms();
        let file_size = picked.size();
        let file_kind = if picked.type_().starts_with("video/") {
            "video"
        } else {
            "image"
        };

        let entered_title = title.get_untracked();
        let entered_title = (!entered_title.is_empty()).then_some(entered_title);
        let entered_description = description.get_untracked();
        let tag_list = parse_tags(&tags.get_untracked());
        let uid = user_id();

        spawn_local(async move {
            let outcome = client
                .upload_media(picked, entered_title, entered_description, &tag_list)
                .await;
            let duration = now_ms() - started;

            match outcome {
                Ok(item) => {
                    track_event(
                        "MediaUpload",
                        props([
                            ("mediaId", json!(item.id)),
                            ("userId", json!(uid)),
                            ("title", json!(item.title)),
                            ("tagsCount", json!(tag_list.len())),
                            ("duration", json!(duration)),
                            ("fileSize", json!(file_size)),
                            ("fileType", json!(file_kind)),
                            ("success", json!(true)),
                        ]),
                    );
                    track_metric(
                        "MediaUploadDuration",
                        duration,
                        props([("fileSize", json!(file_size))]),
                    );
                    track_metric("MediaUploadSize", file_size, props([]));

                    // Clear the form only after a successful upload.
                    title.set(String::new());
                    description.set(String::new());
                    tags.set(String::new());
                    file.set(None);
                }
                Err(err) => {
                    let message = err.user_message();
                    track_event(
                        "MediaUpload",
                        props([
                            ("userId", json!(uid)),
                            ("duration", json!(duration)),
                            ("fileSize", json!(file_size)),
                            ("fileType", json!(file_kind)),
                            ("success", json!(false)),
                            ("error", json!(message)),
                        ]),
                    );
                    track_exception(
                        &err.to_string(),
                        props([("action", json!("upload")), ("fileType", json!(file_kind))]),
                    );
                    error_msg.set(Some(message));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="bg-white border rounded-lg p-4 shadow-sm">
            <div class="text-lg font-medium mb-4 text-gray-900">"Share your art"</div>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <div class="md:col-span-2 space-y-3">
                    <input
                        class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        placeholder="Title"
                        on:input=move |ev| title.set(event_target_value(&ev))
                        prop:value=title
                    />
                    <textarea
                        class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500 resize-none"
                        rows="3"
                        placeholder="Description"
                        on:input=move |ev| description.set(event_target_value(&ev))
                        prop:value=description
                    ></textarea>
                    <input
                        class="w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-indigo-500"
                        placeholder="Tags (comma separated)"
                        on:input=move |ev| tags.set(event_target_value(&ev))
                        prop:value=tags
                    />
                </div>
                <div class="flex flex-col items-center justify-center border-dashed border-2 border-gray-300 rounded p-4 hover:border-indigo-400 transition-colors">
                    <label class="cursor-pointer text-sm text-gray-600 text-center">
                        <input type="file" accept="image/*,video/*" on:change=on_file class="hidden" />
                        <div class="mb-2 text-2xl">"📁"</div>
                        <div class="mb-1 font-medium">"Select image or video"</div>
                        <div class="text-xs text-gray-500">"Max 200MB"</div>
                    </label>
                    <Show when=move || file.with(|f| f.is_some())>
                        <div class="text-xs mt-2 text-gray-700 font-medium truncate max-w-full">
                            {move || file.with(|f| f.as_ref().map(|f| f.name()).unwrap_or_default())}
                        </div>
                    </Show>
                </div>
            </div>
            <Show when=move || error_msg.get().is_some()>
                <div class="mt-3 text-red-600 text-sm bg-red-50 p-2 rounded">
                    {move || error_msg.get().unwrap_or_default()}
                </div>
            </Show>
            <div class="mt-4 flex items-center justify-end">
                <button
                    on:click=on_publish
                    disabled=move || submitting.get()
                    class="px-4 py-2 bg-indigo-600 text-white rounded-md disabled:opacity-60 hover:bg-indigo-700 transition-colors"
                >
                    {move || if submitting.get() { "Publishing..." } else { "Publish" }}
                </button>
            </div>
        </div>
    }
}
