//! Page chrome for the protected area, plus the scoped current-user
//! accessor its subtree uses.

use crate::auth::use_auth;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::right_rail::RightRail;
use artshare_shared::User;
use leptos::prelude::*;

/// Current-user handle scoped to the layout subtree.
#[derive(Clone, Copy)]
pub struct UserContext(Signal<Option<User>>);

/// Read the current user inside a [`Layout`] subtree.
///
/// Panics outside the layout: pages in the protected area are the only
/// intended callers, and a silent `None` there would hide a wiring
/// mistake.
pub fn use_user() -> Signal<Option<User>> {
    use_context::<UserContext>()
        .expect("use_user must be called within Layout")
        .0
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();
    provide_context(UserContext(user));

    view! {
        <div class="min-h-screen bg-gray-50 text-gray-800 flex flex-col">
            <Header />
            <main class="max-w-6xl mx-auto px-4 sm:px-6 lg:px-8 py-8 flex-1 w-full">
                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-2">{children()}</div>
                    <aside class="hidden lg:block">
                        <RightRail />
                    </aside>
                </div>
            </main>
            <Footer />
        </div>
    }
}
