use serde::{Deserialize, Serialize};

pub mod error;
pub mod protocol;
pub mod time;

// =========================================================
// Constants
// =========================================================

/// LocalStorage key under which the persisted session lives.
pub const STORAGE_SESSION_KEY: &str = "artshare_session";

/// Default API base when no build-time override is provided.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

// =========================================================
// Domain models
// =========================================================

/// Read-only projection of a backend user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<std::collections::BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// One uploaded piece of media as the feed and profile consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub thumb: String,
    pub author: User,
    pub uploaded_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl MediaItem {
    /// Ownership check used to gate the edit/delete affordances.
    pub fn is_owned_by(&self, user: &User) -> bool {
        match (&self.author.id, &user.id) {
            (Some(author_id), Some(user_id)) => author_id == user_id,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub artist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_ids: Option<Vec<String>>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_items: Option<Vec<String>>,
}

// =========================================================
// Session
// =========================================================

/// Client-side session: the signed-in user plus the bearer token.
///
/// Invariant: `token` is present if and only if `user` is present
/// (outside the in-flight window of a login request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl Session {
    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

// =========================================================
// Helpers
// =========================================================

/// Split a comma-separated tag string into individual tags.
///
/// Trims whitespace and drops empty entries; duplicates are kept,
/// the backend owns any uniqueness policy.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_drops_empty() {
        assert_eq!(parse_tags("a, b ,b"), vec!["a", "b", "b"]);
        assert_eq!(parse_tags("  music ,, performance ,"), vec![
            "music",
            "performance"
        ]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn session_requires_both_fields() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.token = Some("tok".into());
        assert!(!session.is_authenticated());

        session.user = Some(User {
            name: "Maya Rao".into(),
            handle: "@maya".into(),
            ..Default::default()
        });
        assert!(session.is_authenticated());
    }

    #[test]
    fn media_item_deserializes_wire_shape() {
        let json = r#"{
            "id": "m1",
            "title": "Abstract Sunrise",
            "description": "Oil on canvas - 2024",
            "tags": ["painting", "abstract"],
            "type": "image",
            "thumb": "https://cdn.example/m1.jpg",
            "author": { "id": "u1", "name": "Arjun Das", "handle": "@arjun" },
            "uploadedAt": "2024-06-01T12:00:00Z",
            "visibility": "private"
        }"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.media_type, MediaType::Image);
        assert_eq!(item.visibility, Visibility::Private);
        assert_eq!(item.author.handle, "@arjun");
        assert_eq!(item.uploaded_at, "2024-06-01T12:00:00Z");
    }

    #[test]
    fn media_item_visibility_defaults_to_public() {
        let json = r#"{
            "id": "m2",
            "title": "Nocturne",
            "type": "video",
            "thumb": "t",
            "author": { "name": "Maya Rao", "handle": "@maya" },
            "uploadedAt": "2024-06-01T12:00:00Z"
        }"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.visibility, Visibility::Public);
        assert!(item.tags.is_empty());
    }

    #[test]
    fn ownership_requires_matching_ids() {
        let author = User {
            id: Some("u1".into()),
            name: "Maya".into(),
            handle: "@maya".into(),
            ..Default::default()
        };
        let item = MediaItem {
            id: "m1".into(),
            title: "t".into(),
            description: String::new(),
            tags: vec![],
            media_type: MediaType::Image,
            thumb: String::new(),
            author: author.clone(),
            uploaded_at: String::new(),
            blob_uri: None,
            duration: None,
            visibility: Visibility::Public,
        };

        assert!(item.is_owned_by(&author));

        let other = User {
            id: Some("u2".into()),
            ..author.clone()
        };
        assert!(!item.is_owned_by(&other));

        let anonymous = User {
            id: None,
            ..author
        };
        assert!(!item.is_owned_by(&anonymous));
    }
}
