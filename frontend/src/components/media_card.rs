use crate::auth::use_auth;
use crate::components::delete_confirm_modal::DeleteConfirmModal;
use crate::components::edit_media_modal::EditMediaModal;
use artshare_shared::time::time_ago;
use artshare_shared::{MediaItem, MediaType};
use leptos::prelude::*;

/// One feed entry. Edit/delete affordances appear only when the
/// session user owns the item.
#[component]
pub fn MediaCard(item: MediaItem) -> impl IntoView {
    let auth = use_auth();
    let current_user = auth.user_signal();
    let (edit_open, set_edit_open) = signal(false);
    let (delete_open, set_delete_open) = signal(false);

    let owned = item.clone();
    let is_owner = Signal::derive(move || {
        current_user
            .get()
            .map(|user| owned.is_owned_by(&user))
            .unwrap_or(false)
    });

    let uploaded = time_ago(Some(&item.uploaded_at));
    let author_name = item.author.name.clone();
    let preview = item.clone();
    let edit_item = item.clone();
    let delete_item = item.clone();

    view! {
        <article class="bg-white border rounded-lg overflow-hidden shadow-sm hover:shadow-md transition-shadow">
            <div class="md:flex">
                <div class="md:w-1/3 bg-black flex items-center justify-center min-h-[200px]">
                    {match preview.media_type {
                        MediaType::Video => view! {
                            <video src=preview.thumb controls class="w-full h-full object-cover" preload="metadata" />
                        }
                        .into_any(),
                        MediaType::Image => view! {
                            <img src=preview.thumb alt=preview.title class="w-full h-full object-cover" loading="lazy" />
                        }
                        .into_any(),
                    }}
                </div>
                <div class="p-4 md:w-2/3">
                    <div class="flex items-start justify-between mb-2">
                        <div class="flex-1">
                            <h3 class="font-semibold text-lg text-gray-900 mb-1">{item.title.clone()}</h3>
                            <div class="text-sm text-gray-500">"by " {author_name} " • " {uploaded}</div>
                        </div>
                        <Show when=move || is_owner.get()>
                            <div class="flex items-center space-x-2 ml-2">
                                <button
                                    on:click=move |_| set_edit_open.set(true)
                                    class="p-1.5 text-gray-500 hover:text-indigo-600 hover:bg-indigo-50 rounded transition-colors"
                                    title="Edit"
                                >
                                    "✏️"
                                </button>
                                <button
                                    on:click=move |_| set_delete_open.set(true)
                                    class="p-1.5 text-gray-500 hover:text-red-600 hover:bg-red-50 rounded transition-colors"
                                    title="Delete"
                                >
                                    "🗑️"
                                </button>
                            </div>
                        </Show>
                    </div>
                    <p class="mt-3 text-sm text-gray-700 line-clamp-2">{item.description.clone()}</p>
                    <div class="mt-3 flex flex-wrap gap-1">
                        {item
                            .tags
                            .iter()
                            .take(3)
                            .map(|tag| {
                                view! {
                                    <span class="inline-block px-2 py-1 bg-indigo-50 text-indigo-700 text-xs rounded">
                                        "#" {tag.clone()}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </article>

        <Show when=move || edit_open.get()>
            <EditMediaModal
                media=edit_item.clone()
                on_close=Callback::new(move |()| set_edit_open.set(false))
            />
        </Show>

        <Show when=move || delete_open.get()>
            <DeleteConfirmModal
                media=delete_item.clone()
                on_close=Callback::new(move |()| set_delete_open.set(false))
            />
        </Show>
    }
}
