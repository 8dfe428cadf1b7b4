//! Session store.
//!
//! Holds the signed-in user and bearer token, persisted to
//! LocalStorage and rehydrated before the first render that depends on
//! it. The router checks authentication through an injected signal, so
//! this module never touches navigation.

use artshare_shared::{STORAGE_SESSION_KEY, Session, User};
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

/// Session plus the rehydration flag.
#[derive(Clone, PartialEq)]
pub struct AuthState {
    pub session: Session,
    /// True until the persisted session has been loaded. Session-
    /// dependent rendering is gated on this so no redirect decision is
    /// made against an unhydrated store.
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: Session::default(),
            is_loading: true,
        }
    }
}

/// Read/write signals shared through Context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// Authentication signal injected into the router service.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.is_authenticated()))
    }

    /// Current user, `None` while signed out.
    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.user.clone()))
    }

    /// Bearer token signal injected into the API client.
    pub fn token_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.token.clone()))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Rehydrate the persisted session, then clear the loading flag.
///
/// LocalStorage reads are synchronous, so this completes before the
/// first guarded render. A stored session missing either field is
/// discarded rather than half-restored.
pub fn init_auth(ctx: &AuthContext) {
    let stored: Option<Session> = LocalStorage::get(STORAGE_SESSION_KEY).ok();

    ctx.set_state.update(|state| {
        if let Some(session) = stored {
            if session.is_authenticated() {
                state.session = session;
            }
        }
        state.is_loading = false;
    });
}

/// Store `{user, token}` after a successful login or registration.
pub fn set_credentials(ctx: &AuthContext, user: User, token: String) {
    let session = Session::authenticated(user, token);

    // Persistence is best effort; a full or blocked store only costs
    // the user a re-login after reload.
    if LocalStorage::set(STORAGE_SESSION_KEY, &session).is_err() {
        web_sys::console::warn_1(&"[Auth] failed to persist session".into());
    }

    ctx.set_state.update(|state| state.session = session);
}

/// Clear both fields and the persisted copy.
///
/// Navigation is handled by the router's auth-change listener.
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(STORAGE_SESSION_KEY);
    ctx.set_state.update(|state| state.session = Session::default());
}
