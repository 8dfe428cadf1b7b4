//! Query cache with tag-based invalidation.
//!
//! Every read operation is cached under `(operation name, serialized
//! arguments)`. Each cache category carries an epoch counter; an entry
//! snapshots the epoch sum of its provided categories when a fetch
//! completes, and becomes stale as soon as a mutation bumps one of
//! those counters. Subscribed queries observe the bump through the
//! reactive graph and refetch on their own, so a component deleting a
//! media item never has to tell the feed to reload.
//!
//! Entries are reference-counted by their subscribers and evicted when
//! the last one unmounts, so transient queries do not accumulate over
//! a session.
//!
//! The cache state itself ([`CacheCore`]) is plain data with no signal
//! or network dependency, which keeps the staleness and deduplication
//! rules testable on the host.

use crate::api::ApiClient;
use artshare_shared::MediaItem;
use artshare_shared::error::ApiError;
use artshare_shared::protocol::{ApiMutation, ApiQuery, CacheTag};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{HashMap, HashSet};

// =========================================================
// Core state (pure)
// =========================================================

/// Cache key: operation name plus serialized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub op: &'static str,
    pub args: String,
}

impl QueryKey {
    pub fn of<Q: ApiQuery>(query: &Q) -> Self {
        Self {
            op: Q::NAME,
            // Serialization of plain argument structs cannot fail;
            // an empty-args fallback still yields a usable key.
            args: serde_json::to_string(query).unwrap_or_default(),
        }
    }
}

/// Last-known result for one query key.
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    /// Serialized response body; decoded per read.
    pub data: Option<String>,
    /// Failure of the most recent fetch. Terminal until the entry is
    /// invalidated or the subscriber's arguments change.
    pub error: Option<ApiError>,
    pub is_loading: bool,
    /// Epoch sum of the provided tags at the time the fetch began.
    epoch: u64,
}

/// Entry map, per-tag epoch counters, the in-flight set and the
/// subscriber counts driving eviction.
#[derive(Debug, Default)]
pub struct CacheCore {
    entries: HashMap<QueryKey, CacheEntry>,
    epochs: HashMap<CacheTag, u64>,
    inflight: HashSet<QueryKey>,
    subscribers: HashMap<QueryKey, usize>,
}

impl CacheCore {
    fn epoch_sum(&self, tags: &[CacheTag]) -> u64 {
        tags.iter()
            .map(|tag| self.epochs.get(tag).copied().unwrap_or(0))
            .sum()
    }

    /// Whether a subscription for `key` must start a fetch now.
    ///
    /// False while an identical request is in flight, which is what
    /// makes concurrent subscriptions share one network call.
    pub fn needs_fetch(&self, key: &QueryKey, tags: &[CacheTag]) -> bool {
        if self.inflight.contains(key) {
            return false;
        }
        match self.entries.get(key) {
            None => true,
            Some(entry) => !entry.is_loading && entry.epoch != self.epoch_sum(tags),
        }
    }

    /// Mark the key loading and in flight. Existing data stays visible
    /// to subscribers while the refetch runs.
    pub fn begin_fetch(&mut self, key: QueryKey, tags: &[CacheTag]) {
        let epoch = self.epoch_sum(tags);
        let entry = self.entries.entry(key.clone()).or_default();
        entry.is_loading = true;
        entry.epoch = epoch;
        self.inflight.insert(key);
    }

    /// Record the outcome of a fetch started with [`begin_fetch`].
    ///
    /// A completion for a key no longer in flight belongs to an
    /// evicted subscription and is discarded.
    pub fn complete_fetch(&mut self, key: &QueryKey, result: Result<String, ApiError>) {
        if !self.inflight.remove(key) {
            return;
        }
        let entry = self.entries.entry(key.clone()).or_default();
        entry.is_loading = false;
        match result {
            Ok(body) => {
                entry.data = Some(body);
                entry.error = None;
            }
            Err(err) => {
                entry.error = Some(err);
            }
        }
    }

    /// Register one subscriber for a key.
    pub fn subscribe(&mut self, key: QueryKey) {
        *self.subscribers.entry(key).or_insert(0) += 1;
    }

    /// Drop one subscriber. When the last one goes away the entry and
    /// any in-flight marker are evicted, so one-off queries (every
    /// distinct search term, say) do not accumulate for the session's
    /// lifetime.
    pub fn unsubscribe(&mut self, key: &QueryKey) {
        if let Some(count) = self.subscribers.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                self.subscribers.remove(key);
                self.entries.remove(key);
                self.inflight.remove(key);
            }
        }
    }

    /// Bump a category's epoch, marking every entry that provides it
    /// stale.
    pub fn invalidate(&mut self, tag: CacheTag) {
        *self.epochs.entry(tag).or_insert(0) += 1;
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }
}

// =========================================================
// Reactive client
// =========================================================

/// Cache core behind a signal, plus the API client executing fetches.
/// Provided once at the app root; `Copy` so event handlers can capture
/// it freely.
#[derive(Clone, Copy)]
pub struct QueryClient {
    core: RwSignal<CacheCore>,
    api: StoredValue<ApiClient>,
}

impl QueryClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            core: RwSignal::new(CacheCore::default()),
            api: StoredValue::new(api),
        }
    }

    pub fn provide(api: ApiClient) -> Self {
        let client = Self::new(api);
        provide_context(client);
        client
    }

    fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Bump every listed tag. Subscribed queries providing one of them
    /// refetch through their own effects.
    pub fn invalidate(&self, tags: &[CacheTag]) {
        if tags.is_empty() {
            return;
        }
        self.core.update(|core| {
            for tag in tags {
                core.invalidate(*tag);
            }
        });
    }

    /// Run a mutation; on success, invalidate its declared categories.
    /// Failures invalidate nothing, the caller surfaces the error and
    /// the user may retry.
    pub async fn mutate<M: ApiMutation>(&self, mutation: &M) -> Result<M::Response, ApiError> {
        let result = self.api().mutate(mutation).await;
        if result.is_ok() {
            self.invalidate(M::INVALIDATES);
        }
        result
    }

    /// Multipart upload, invalidating the media category on success
    /// like any other media mutation.
    pub async fn upload_media(
        &self,
        file: web_sys::File,
        title: Option<String>,
        description: String,
        tags: &[String],
    ) -> Result<MediaItem, ApiError> {
        let result = self.api().upload_media(file, title, description, tags).await;
        if result.is_ok() {
            self.invalidate(&[CacheTag::Media]);
        }
        result
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient should be provided")
}

/// Reactive view of one cached query.
///
/// `Send + Sync` comes from the signals' shared storage, not from any
/// copyability of `T` itself.
pub struct QueryHandle<T: Send + Sync + 'static> {
    /// Last-known result; present even while a refetch is in flight.
    pub data: Signal<Option<T>>,
    pub is_loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
}

// Manual impls: the handle is copyable whether or not `T` is, since it
// only holds signals.
impl<T: Send + Sync + 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryHandle<T> {}

/// Subscribe to a query for as long as the calling component lives.
///
/// `args` returning `None` skips the query entirely (no fetch, no
/// loading flag). The subscription refetches when the arguments change
/// or when a mutation invalidates one of the query's categories.
pub fn use_query<Q>(
    args: impl Fn() -> Option<Q> + Send + Sync + 'static,
) -> QueryHandle<Q::Response>
where
    Q: ApiQuery + Clone + PartialEq + Send + Sync + 'static,
    Q::Response: Send + Sync,
{
    let client = use_query_client();
    let query = Memo::new(move |_| args());

    // Subscription lifecycle: entries are reference-counted and
    // evicted when the last subscriber goes away.
    let active_key = StoredValue::new(Option::<QueryKey>::None);
    Effect::new(move |_| {
        let key = query.get().map(|q| QueryKey::of(&q));
        let previous = active_key.get_value();
        if previous == key {
            return;
        }
        if let Some(prev) = previous {
            client.core.update(|core| core.unsubscribe(&prev));
        }
        if let Some(k) = key.clone() {
            client.core.update(|core| core.subscribe(k));
        }
        active_key.set_value(key);
    });
    on_cleanup(move || {
        if let Some(key) = active_key.get_value() {
            client.core.update(|core| core.unsubscribe(&key));
        }
    });

    // Fetch driver: re-runs on argument change and on every cache
    // write, including the epoch bumps mutations perform. needs_fetch
    // keeps the re-runs idempotent.
    Effect::new(move |_| {
        let Some(q) = query.get() else {
            return;
        };
        let key = QueryKey::of(&q);
        let should_fetch = client.core.with(|core| core.needs_fetch(&key, Q::PROVIDES));
        if !should_fetch {
            return;
        }

        client
            .core
            .update(|core| core.begin_fetch(key.clone(), Q::PROVIDES));

        let api = client.api();
        spawn_local(async move {
            let outcome = api.query(&q).await.and_then(|response| {
                serde_json::to_string(&response).map_err(|e| ApiError::Decode(e.to_string()))
            });
            client.core.update(|core| core.complete_fetch(&key, outcome));
        });
    });

    let data = Signal::derive(move || {
        let q = query.get()?;
        let key = QueryKey::of(&q);
        client.core.with(|core| {
            core.entry(&key)
                .and_then(|entry| entry.data.as_deref())
                .and_then(|body| serde_json::from_str(body).ok())
        })
    });

    let is_loading = Signal::derive(move || match query.get() {
        None => false,
        Some(q) => {
            let key = QueryKey::of(&q);
            client
                .core
                .with(|core| core.entry(&key).map(|e| e.is_loading).unwrap_or(true))
        }
    });

    let error = Signal::derive(move || {
        let q = query.get()?;
        let key = QueryKey::of(&q);
        client
            .core
            .with(|core| core.entry(&key).and_then(|e| e.error.clone()))
    });

    QueryHandle {
        data,
        is_loading,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artshare_shared::protocol::{DeleteMedia, GetMedia};

    fn media_key() -> QueryKey {
        QueryKey::of(&GetMedia::default())
    }

    #[test]
    fn keys_depend_on_operation_and_arguments() {
        let all = QueryKey::of(&GetMedia::default());
        let mine = QueryKey::of(&GetMedia {
            artist_id: Some("u1".into()),
            ..Default::default()
        });
        assert_eq!(all.op, "getMedia");
        assert_ne!(all, mine);
        assert_eq!(all, QueryKey::of(&GetMedia::default()));
    }

    #[test]
    fn concurrent_identical_subscriptions_share_one_fetch() {
        let mut core = CacheCore::default();
        let key = media_key();

        // First subscriber starts the fetch.
        assert!(core.needs_fetch(&key, GetMedia::PROVIDES));
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);

        // Second subscriber arrives before resolution: no second call.
        assert!(!core.needs_fetch(&key, GetMedia::PROVIDES));

        core.complete_fetch(&key, Ok("[]".into()));
        let entry = core.entry(&key).unwrap();
        assert_eq!(entry.data.as_deref(), Some("[]"));
        assert!(!entry.is_loading);

        // Resolved and fresh: nobody refetches.
        assert!(!core.needs_fetch(&key, GetMedia::PROVIDES));
    }

    #[test]
    fn mutation_invalidation_marks_provided_entries_stale() {
        let mut core = CacheCore::default();
        let key = media_key();
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(&key, Ok(r#"[{"id":"m1"}]"#.into()));
        assert!(!core.needs_fetch(&key, GetMedia::PROVIDES));

        for tag in DeleteMedia::INVALIDATES {
            core.invalidate(*tag);
        }

        // Stale now; the cached data is still readable meanwhile.
        assert!(core.needs_fetch(&key, GetMedia::PROVIDES));
        assert!(core.entry(&key).unwrap().data.is_some());

        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(&key, Ok("[]".into()));
        assert!(!core.needs_fetch(&key, GetMedia::PROVIDES));
    }

    #[test]
    fn unrelated_tags_do_not_invalidate() {
        let mut core = CacheCore::default();
        let key = media_key();
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(&key, Ok("[]".into()));

        core.invalidate(CacheTag::Portfolio);
        assert!(!core.needs_fetch(&key, GetMedia::PROVIDES));
    }

    #[test]
    fn failed_fetch_is_terminal_until_invalidated() {
        let mut core = CacheCore::default();
        let key = media_key();
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(
            &key,
            Err(ApiError::Network("connection refused".into())),
        );

        let entry = core.entry(&key).unwrap();
        assert!(entry.error.is_some());
        assert!(entry.data.is_none());

        // No automatic retry.
        assert!(!core.needs_fetch(&key, GetMedia::PROVIDES));

        // Invalidation re-arms the subscription.
        core.invalidate(CacheTag::Media);
        assert!(core.needs_fetch(&key, GetMedia::PROVIDES));
    }

    #[test]
    fn refetch_clears_previous_error() {
        let mut core = CacheCore::default();
        let key = media_key();
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(&key, Err(ApiError::Network("offline".into())));

        core.invalidate(CacheTag::Media);
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(&key, Ok("[]".into()));

        let entry = core.entry(&key).unwrap();
        assert!(entry.error.is_none());
        assert_eq!(entry.data.as_deref(), Some("[]"));
    }

    #[test]
    fn invalidation_during_flight_leaves_entry_stale() {
        let mut core = CacheCore::default();
        let key = media_key();
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);

        // A mutation lands while the fetch is still running.
        core.invalidate(CacheTag::Media);
        core.complete_fetch(&key, Ok("[]".into()));

        // The snapshot predates the bump, so the entry refetches.
        assert!(core.needs_fetch(&key, GetMedia::PROVIDES));
    }

    #[test]
    fn query_handles_are_copyable_for_non_copy_responses() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<QueryHandle<Vec<artshare_shared::MediaItem>>>();
        assert_copy::<QueryHandle<artshare_shared::protocol::SearchResults>>();
    }

    #[test]
    fn last_unsubscribe_evicts_the_entry() {
        let mut core = CacheCore::default();
        let key = media_key();

        core.subscribe(key.clone());
        core.subscribe(key.clone());
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);
        core.complete_fetch(&key, Ok("[]".into()));

        // One of two subscribers leaving keeps the entry alive.
        core.unsubscribe(&key);
        assert!(core.entry(&key).is_some());

        // The last one leaving evicts it.
        core.unsubscribe(&key);
        assert!(core.entry(&key).is_none());

        // A fresh subscriber starts over.
        core.subscribe(key.clone());
        assert!(core.needs_fetch(&key, GetMedia::PROVIDES));
    }

    #[test]
    fn completion_after_eviction_is_discarded() {
        let mut core = CacheCore::default();
        let key = media_key();

        core.subscribe(key.clone());
        core.begin_fetch(key.clone(), GetMedia::PROVIDES);

        // The subscriber unmounts while the fetch is still running.
        core.unsubscribe(&key);
        core.complete_fetch(&key, Ok("[]".into()));

        assert!(core.entry(&key).is_none());
    }

    #[test]
    fn untagged_queries_never_go_stale() {
        let mut core = CacheCore::default();
        let key = QueryKey {
            op: "getTrending",
            args: "null".into(),
        };
        core.begin_fetch(key.clone(), &[]);
        core.complete_fetch(&key, Ok(r#"{"tags":[],"media":[]}"#.into()));

        core.invalidate(CacheTag::Media);
        assert!(!core.needs_fetch(&key, &[]));
    }
}
