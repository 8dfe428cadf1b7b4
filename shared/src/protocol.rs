//! Declarative REST protocol.
//!
//! Every network operation the app performs is declared here as a type
//! implementing [`ApiQuery`] or [`ApiMutation`]. The trait carries the
//! request shape, the response type, the URL path and the cache
//! categories the operation provides or invalidates, so the frontend's
//! query cache can drive refetching without per-call wiring.

use crate::{MediaItem, MediaType, Portfolio, User, Visibility};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// =========================================================
// Cache categories
// =========================================================

/// Label attached to a query (provides) or mutation (invalidates).
///
/// A successful mutation marks every cache entry tagged with one of its
/// invalidated categories stale, which triggers a refetch of the
/// subscribed queries that provide that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheTag {
    User,
    Media,
    Portfolio,
}

impl CacheTag {
    /// All known tags, used to seed the epoch table.
    pub const ALL: [CacheTag; 3] = [CacheTag::User, CacheTag::Media, CacheTag::Portfolio];
}

/// HTTP methods used by mutations. Queries are always GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// =========================================================
// Operation traits
// =========================================================

/// A read operation: idempotent, cacheable, always GET.
///
/// The serialized value of the implementing type doubles as the cache
/// key arguments, so two queries with equal fields share one entry.
pub trait ApiQuery: Serialize {
    /// Response body type.
    type Response: Serialize + DeserializeOwned;
    /// Stable operation name, the first half of the cache key.
    const NAME: &'static str;
    /// Cache categories this query's result belongs to.
    const PROVIDES: &'static [CacheTag];
    /// Path plus query string, relative to the API base.
    fn path(&self) -> String;
}

/// A write operation: non-idempotent, never cached.
pub trait ApiMutation: Serialize {
    type Response: Serialize + DeserializeOwned;
    const NAME: &'static str;
    const METHOD: HttpMethod;
    /// Cache categories whose entries become stale on success.
    const INVALIDATES: &'static [CacheTag];
    /// Whether the serialized value is sent as the JSON body.
    /// DELETE-with-id-in-path operations carry no body.
    const SEND_BODY: bool = true;
    fn path(&self) -> String;
}

/// Percent-encode a query-string value (RFC 3986 unreserved set).
pub fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub name: String,
    pub handle: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_type: Option<String>,
}

/// `{token, user}` returned by both auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl ApiMutation for Register {
    type Response = AuthResponse;
    const NAME: &'static str = "register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [CacheTag] = &[];

    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl ApiMutation for Login {
    type Response = AuthResponse;
    const NAME: &'static str = "login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [CacheTag] = &[];

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

// =========================================================
// Media
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ApiQuery for GetMedia {
    type Response = Vec<MediaItem>;
    const NAME: &'static str = "getMedia";
    const PROVIDES: &'static [CacheTag] = &[CacheTag::Media];

    fn path(&self) -> String {
        let mut params = Vec::new();
        if let Some(artist_id) = &self.artist_id {
            params.push(format!("artistId={}", encode_query_value(artist_id)));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        if let Some(offset) = self.offset {
            params.push(format!("offset={offset}"));
        }
        if params.is_empty() {
            "/media".to_string()
        } else {
            format!("/media?{}", params.join("&"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMediaById {
    pub id: String,
    pub artist_id: String,
}

impl ApiQuery for GetMediaById {
    type Response = MediaItem;
    const NAME: &'static str = "getMediaById";
    const PROVIDES: &'static [CacheTag] = &[CacheTag::Media];

    fn path(&self) -> String {
        format!(
            "/media/{}?artistId={}",
            self.id,
            encode_query_value(&self.artist_id)
        )
    }
}

/// Obtain a pre-signed upload target for direct blob upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUpload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUploadResponse {
    pub sas_url: String,
    pub media_id: String,
    pub blob_name: String,
    pub blob_url: String,
}

impl ApiMutation for RequestUpload {
    type Response = RequestUploadResponse;
    const NAME: &'static str = "requestUpload";
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [CacheTag] = &[CacheTag::Media];

    fn path(&self) -> String {
        "/media/request-upload".to_string()
    }
}

/// Create a media record after a direct blob upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl ApiMutation for CreateMedia {
    type Response = MediaItem;
    const NAME: &'static str = "createMedia";
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [CacheTag] = &[CacheTag::Media];

    fn path(&self) -> String {
        "/media".to_string()
    }
}

/// The editable subset of a media record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUpdates {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMedia {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub updates: MediaUpdates,
}

impl ApiMutation for UpdateMedia {
    type Response = MediaItem;
    const NAME: &'static str = "updateMedia";
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [CacheTag] = &[CacheTag::Media];

    fn path(&self) -> String {
        format!("/media/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMedia {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMediaResponse {
    pub message: String,
}

impl ApiMutation for DeleteMedia {
    type Response = DeleteMediaResponse;
    const NAME: &'static str = "deleteMedia";
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [CacheTag] = &[CacheTag::Media];
    const SEND_BODY: bool = false;

    fn path(&self) -> String {
        format!("/media/{}", self.id)
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUser {
    pub id: String,
}

impl ApiQuery for GetUser {
    type Response = User;
    const NAME: &'static str = "getUser";
    const PROVIDES: &'static [CacheTag] = &[CacheTag::User];

    fn path(&self) -> String {
        format!("/users/{}", self.id)
    }
}

// =========================================================
// Discovery
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub q: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl ApiQuery for Search {
    type Response = SearchResults;
    const NAME: &'static str = "search";
    const PROVIDES: &'static [CacheTag] = &[];

    fn path(&self) -> String {
        format!("/discovery/search?q={}", encode_query_value(&self.q))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetTrending;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendingResults {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl ApiQuery for GetTrending {
    type Response = TrendingResults;
    const NAME: &'static str = "getTrending";
    const PROVIDES: &'static [CacheTag] = &[];

    fn path(&self) -> String {
        "/discovery/trending".to_string()
    }
}

// =========================================================
// Moderation
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagContent {
    pub media_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagContentResponse {
    pub id: String,
    pub media_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub status: String,
}

impl ApiMutation for FlagContent {
    type Response = FlagContentResponse;
    const NAME: &'static str = "flagContent";
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [CacheTag] = &[];

    fn path(&self) -> String {
        "/moderation/flag".to_string()
    }
}

// =========================================================
// Portfolios
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPortfolio {
    pub artist_id: String,
}

impl ApiQuery for GetPortfolio {
    type Response = Portfolio;
    const NAME: &'static str = "getPortfolio";
    const PROVIDES: &'static [CacheTag] = &[CacheTag::Portfolio];

    fn path(&self) -> String {
        format!("/portfolios/{}", self.artist_id)
    }
}

/// The editable subset of a portfolio record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_items: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePortfolio {
    #[serde(skip)]
    pub artist_id: String,
    #[serde(flatten)]
    pub updates: PortfolioUpdates,
}

impl ApiMutation for UpdatePortfolio {
    type Response = Portfolio;
    const NAME: &'static str = "updatePortfolio";
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [CacheTag] = &[CacheTag::Portfolio];

    fn path(&self) -> String {
        format!("/portfolios/{}", self.artist_id)
    }
}

// =========================================================
// Insights
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetInsightsStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsStatus {
    pub status: String,
    pub application_insights: AppInsightsInfo,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInsightsInfo {
    pub configured: bool,
    pub initialized: bool,
    pub connection_string: Option<String>,
    pub enabled_features: EnabledFeatures,
    pub cloud_role: Option<String>,
    pub cloud_role_instance: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledFeatures {
    pub auto_dependency_correlation: bool,
    pub auto_collect_requests: bool,
    pub auto_collect_performance: bool,
    pub auto_collect_exceptions: bool,
    pub auto_collect_dependencies: bool,
    pub auto_collect_console: bool,
    pub use_disk_retry_caching: bool,
    pub send_live_metrics: bool,
}

impl EnabledFeatures {
    /// Named flags in a stable order for rendering.
    pub fn entries(&self) -> [(&'static str, bool); 8] {
        [
            ("Auto Dependency Correlation", self.auto_dependency_correlation),
            ("Auto Collect Requests", self.auto_collect_requests),
            ("Auto Collect Performance", self.auto_collect_performance),
            ("Auto Collect Exceptions", self.auto_collect_exceptions),
            ("Auto Collect Dependencies", self.auto_collect_dependencies),
            ("Auto Collect Console", self.auto_collect_console),
            ("Use Disk Retry Caching", self.use_disk_retry_caching),
            ("Send Live Metrics", self.send_live_metrics),
        ]
    }
}

impl ApiQuery for GetInsightsStatus {
    type Response = InsightsStatus;
    const NAME: &'static str = "getInsightsStatus";
    const PROVIDES: &'static [CacheTag] = &[];

    fn path(&self) -> String {
        "/insights/status".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_media_path_omits_absent_params() {
        assert_eq!(GetMedia::default().path(), "/media");
        assert_eq!(
            GetMedia {
                artist_id: Some("u1".into()),
                limit: Some(20),
                offset: None,
            }
            .path(),
            "/media?artistId=u1&limit=20"
        );
    }

    #[test]
    fn search_path_percent_encodes_query() {
        let q = Search {
            q: "oil on canvas & #abstract".into(),
        };
        assert_eq!(
            q.path(),
            "/discovery/search?q=oil%20on%20canvas%20%26%20%23abstract"
        );
    }

    #[test]
    fn media_by_id_path_carries_artist_id() {
        let q = GetMediaById {
            id: "m1".into(),
            artist_id: "u1".into(),
        };
        assert_eq!(q.path(), "/media/m1?artistId=u1");
    }

    #[test]
    fn update_media_flattens_updates_and_skips_id() {
        let m = UpdateMedia {
            id: "m1".into(),
            updates: MediaUpdates {
                title: "t".into(),
                description: "d".into(),
                tags: vec!["a".into(), "b".into(), "b".into()],
                visibility: Visibility::Private,
            },
        };
        assert_eq!(m.path(), "/media/m1");

        let body = serde_json::to_value(&m).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "title": "t",
                "description": "d",
                "tags": ["a", "b", "b"],
                "visibility": "private"
            })
        );
    }

    #[test]
    fn delete_media_sends_no_body() {
        assert!(!DeleteMedia::SEND_BODY);
        assert_eq!(DeleteMedia { id: "m9".into() }.path(), "/media/m9");
    }

    #[test]
    fn register_omits_missing_artist_type() {
        let req = Register {
            name: "Maya Rao".into(),
            handle: "maya".into(),
            email: "maya@example.com".into(),
            password: "hunter2".into(),
            artist_type: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("artistType").is_none());
    }

    #[test]
    fn insights_status_deserializes_full_shape() {
        let json = r#"{
            "status": "ok",
            "applicationInsights": {
                "configured": true,
                "initialized": true,
                "connectionString": "InstrumentationKey=abc",
                "enabledFeatures": {
                    "autoDependencyCorrelation": true,
                    "autoCollectRequests": true,
                    "autoCollectPerformance": false,
                    "autoCollectExceptions": true,
                    "autoCollectDependencies": true,
                    "autoCollectConsole": false,
                    "useDiskRetryCaching": true,
                    "sendLiveMetrics": false
                },
                "cloudRole": "artshare-api",
                "cloudRoleInstance": null
            },
            "timestamp": "2024-06-01T12:00:00Z"
        }"#;

        let status: InsightsStatus = serde_json::from_str(json).unwrap();
        assert!(status.application_insights.configured);
        assert_eq!(
            status.application_insights.cloud_role.as_deref(),
            Some("artshare-api")
        );
        let entries = status.application_insights.enabled_features.entries();
        assert_eq!(entries[0], ("Auto Dependency Correlation", true));
        assert_eq!(entries[7], ("Send Live Metrics", false));
    }

    #[test]
    fn mutation_tag_table_matches_contract() {
        assert_eq!(DeleteMedia::INVALIDATES, &[CacheTag::Media]);
        assert_eq!(UpdateMedia::INVALIDATES, &[CacheTag::Media]);
        assert_eq!(CreateMedia::INVALIDATES, &[CacheTag::Media]);
        assert_eq!(UpdatePortfolio::INVALIDATES, &[CacheTag::Portfolio]);
        assert!(Login::INVALIDATES.is_empty());
        assert_eq!(GetMedia::PROVIDES, &[CacheTag::Media]);
        assert_eq!(GetUser::PROVIDES, &[CacheTag::User]);
    }
}
