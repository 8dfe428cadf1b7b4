//! Router service.
//!
//! Wraps the History API behind a signal-driven service: every
//! navigation request passes both guards before the route signal
//! updates. The authentication check is an injected signal, so the
//! router knows nothing about how sessions are stored.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Signal-driven router with guard enforcement.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigate to a path, enforcing both guards.
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// Guard a target route against the current session: `None` means
    /// pass through, `Some` is the redirect to commit instead.
    fn guard(&self, target: AppRoute) -> Option<AppRoute> {
        let is_auth = self.is_authenticated.get_untracked();

        if target.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[Router] access denied, redirecting to login".into());
            return Some(AppRoute::auth_failure_redirect());
        }
        if target.public_only() && is_auth {
            web_sys::console::log_1(&"[Router] already authenticated, redirecting to feed".into());
            return Some(AppRoute::auth_success_redirect());
        }
        None
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        match self.guard(target) {
            // A guard redirect replaces history rather than stacking
            // an entry the back button would bounce off.
            Some(redirect) => {
                replace_history_state(redirect.to_path());
                self.set_route.set(redirect);
            }
            None => {
                if use_push {
                    push_history_state(target.to_path());
                } else {
                    replace_history_state(target.to_path());
                }
                self.set_route.set(target);
            }
        }
    }

    /// Back/forward buttons re-run the guards too.
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = service.guard(target).unwrap_or(target);
            if resolved != target {
                replace_history_state(resolved.to_path());
            }
            service.set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure so the listener stays alive for the life of
        // the page.
        closure.forget();
    }

    /// Redirect automatically when the session state flips: login on a
    /// public-only page goes to the feed, logout on a protected page
    /// goes to login.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth && route.public_only() {
                let redirect = AppRoute::auth_success_redirect();
                push_history_state(redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(&"[Router] signed in, redirecting to feed".into());
            } else if !is_auth && route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(&"[Router] signed out, redirecting to login".into());
            }
        });
    }

    /// Re-apply the guards to the route the page loaded on. Runs once
    /// after construction, when the session store is already hydrated.
    fn enforce_initial_route(&self) {
        let target = self.current_route.get_untracked();
        if let Some(redirect) = self.guard(target) {
            replace_history_state(redirect.to_path());
            self.set_route.set(redirect);
        }
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.enforce_initial_route();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// Navigation closure for event handlers.
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// Components
// ============================================================================

/// Root router component; provides the service to the whole tree.
#[component]
pub fn Router(
    /// Session signal injected from the auth context.
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Renders the view matching the current route.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// Anchor that routes client-side instead of reloading.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let href = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
