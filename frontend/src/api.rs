//! HTTP execution for the declared protocol operations.
//!
//! The client owns the base URL and a token signal injected from the
//! session store; every request carries `Authorization: Bearer <token>`
//! while a session is active. Callers never build URLs or headers
//! themselves, they hand over an [`ApiQuery`] or [`ApiMutation`] value.

use artshare_shared::error::ApiError;
use artshare_shared::protocol::{ApiMutation, ApiQuery, HttpMethod};
use artshare_shared::{DEFAULT_API_BASE_URL, MediaItem};
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Signal<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Signal<Option<String>>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// Base URL from the build environment, falling back to the local
    /// development backend.
    pub fn from_env(token: Signal<Option<String>>) -> Self {
        let base_url = option_env!("ARTSHARE_API_URL").unwrap_or(DEFAULT_API_BASE_URL);
        Self::new(base_url, token)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.get_untracked() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Execute a declared read operation.
    pub async fn query<Q: ApiQuery>(&self, query: &Q) -> Result<Q::Response, ApiError> {
        let url = self.url(&query.path());
        let response = self
            .with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// Execute a declared write operation. Cache invalidation is the
    /// caller's concern (see the query client).
    pub async fn mutate<M: ApiMutation>(&self, mutation: &M) -> Result<M::Response, ApiError> {
        let url = self.url(&mutation.path());
        let builder = self.with_auth(match M::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        });

        let response = if M::SEND_BODY {
            builder
                .json(mutation)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
        } else {
            builder.send().await
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// Multipart upload: the one operation that cannot be expressed as
    /// a JSON body. Tags travel as a comma-joined form field; the title
    /// defaults to the file name.
    pub async fn upload_media(
        &self,
        file: web_sys::File,
        title: Option<String>,
        description: String,
        tags: &[String],
    ) -> Result<MediaItem, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Network(format!("failed to build form data: {e:?}")))?;

        let title = title.unwrap_or_else(|| file.name());
        form.append_with_blob("file", &file)
            .map_err(|e| ApiError::Network(format!("failed to attach file: {e:?}")))?;
        form.append_with_str("title", &title)
            .map_err(|e| ApiError::Network(format!("failed to attach title: {e:?}")))?;
        if !description.is_empty() {
            form.append_with_str("description", &description)
                .map_err(|e| ApiError::Network(format!("failed to attach description: {e:?}")))?;
        }
        if !tags.is_empty() {
            form.append_with_str("tags", &tags.join(","))
                .map_err(|e| ApiError::Network(format!("failed to attach tags: {e:?}")))?;
        }

        // No Content-Type header: the browser sets the multipart
        // boundary itself.
        let response = self
            .with_auth(Request::post(&self.url("/media/upload")))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }
}

/// Decode a response body, recovering the structured `{error}` shape
/// from non-2xx answers.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::from_response_body(status, &text));
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
