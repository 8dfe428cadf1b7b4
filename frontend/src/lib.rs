//! ArtShare frontend application.
//!
//! Context-driven architecture with the seams kept loose:
//! - `web::route`: route table (domain model)
//! - `web::router`: router service (core engine)
//! - `auth`: session state management
//! - `cache`: query cache with tag-based invalidation
//! - `api`: REST client executing the declared protocol
//! - `telemetry`: best-effort instrumentation sink
//! - `components` / `pages`: UI layer

mod api;
mod auth;
mod cache;
mod telemetry;

mod components {
    mod delete_confirm_modal;
    mod edit_media_modal;
    mod footer;
    mod header;
    pub mod layout;
    pub mod media_card;
    mod right_rail;
    mod search_box;
    pub mod upload_card;
}

mod pages {
    pub mod explore;
    pub mod feed;
    pub mod home;
    pub mod insights_status;
    pub mod login;
    pub mod profile;
    pub mod signup;
}

pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use crate::api::ApiClient;
use crate::auth::{AuthContext, init_auth};
use crate::cache::QueryClient;
use crate::components::layout::Layout;
use crate::pages::explore::ExplorePage;
use crate::pages::feed::FeedPage;
use crate::pages::home::HomePage;
use crate::pages::insights_status::InsightsStatusPage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::signup::SignupPage;

use leptos::prelude::*;

pub use telemetry::init_telemetry;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Maps the current route to its view. Protected pages render inside
/// the shared [`Layout`]; the auth pages and landing page carry their
/// own chrome.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home | AppRoute::NotFound => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Feed => view! {
            <Layout>
                <FeedPage />
            </Layout>
        }
        .into_any(),
        AppRoute::Explore => view! {
            <Layout>
                <ExplorePage />
            </Layout>
        }
        .into_any(),
        AppRoute::Profile => view! {
            <Layout>
                <ProfilePage />
            </Layout>
        }
        .into_any(),
        AppRoute::Insights => view! {
            <Layout>
                <InsightsStatusPage />
            </Layout>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Create the session context.
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. Rehydrate the persisted session from LocalStorage. This is
    //    synchronous, so the guards below never see a half-restored
    //    store and never commit a wrong redirect.
    init_auth(&auth_ctx);

    // 3. The router and API client take signals, not the context
    //    itself, so neither knows how sessions are stored.
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let api = ApiClient::from_env(auth_ctx.token_signal());
    QueryClient::provide(api);

    let state = auth_ctx.state;

    view! {
        // Session-dependent rendering waits for rehydration.
        <Show when=move || !state.with(|s| s.is_loading)>
            <Router is_authenticated=is_authenticated>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </Show>
    }
}
