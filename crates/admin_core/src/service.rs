//! Async client for the dictionary API consumed by the backend worker.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{DictionaryRecord, OrgMembership, Profile, VersionId, VersionRecord},
    error::{ApiError, ApiException, ErrorCode},
    protocol::{
        CreateCollectionBody, CreateVersionRequest, EditVersionRequest, NewDictionary,
        ReleaseStatusPatch,
    },
};
use tracing::debug;
use url::Url;

/// Working copy every dictionary has; never listed as a release.
const HEAD_VERSION: &str = "HEAD";

#[async_trait]
pub trait DictionaryService: Send + Sync {
    async fn retrieve_profile(&self) -> Result<Profile, ApiException>;
    async fn list_user_orgs(&self) -> Result<Vec<OrgMembership>, ApiException>;
    async fn retrieve_dictionary(&self, dictionary_url: &str)
        -> Result<DictionaryRecord, ApiException>;
    async fn list_versions(&self, dictionary_url: &str) -> Result<Vec<VersionRecord>, ApiException>;
    async fn edit_version(
        &self,
        dictionary_url: &str,
        request: &EditVersionRequest,
    ) -> Result<VersionRecord, ApiException>;
    async fn create_version(&self, dictionary_url: &str) -> Result<VersionRecord, ApiException>;
    async fn create_dictionary(&self, form: &NewDictionary)
        -> Result<DictionaryRecord, ApiException>;
}

pub struct HttpDictionaryService {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpDictionaryService {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).with_context(|| format!("invalid api base url '{base_url}'"))?;
        Ok(Self {
            http: Client::new(),
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiException> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiException::new(ErrorCode::Validation, format!("bad url '{path}': {err}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Token {token}")),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiException> {
        let res = builder
            .send()
            .await
            .map_err(|err| ApiException::new(ErrorCode::Transport, err.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "dictionary api request failed");
            return Err(ApiError::from_body(ErrorCode::from_status(status.as_u16()), &body).into());
        }
        res.json::<T>()
            .await
            .map_err(|err| ApiException::new(ErrorCode::Internal, format!("malformed response: {err}")))
    }
}

#[async_trait]
impl DictionaryService for HttpDictionaryService {
    async fn retrieve_profile(&self) -> Result<Profile, ApiException> {
        let url = self.endpoint("user/")?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn list_user_orgs(&self) -> Result<Vec<OrgMembership>, ApiException> {
        let url = self.endpoint("user/orgs/")?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn retrieve_dictionary(
        &self,
        dictionary_url: &str,
    ) -> Result<DictionaryRecord, ApiException> {
        let url = self.endpoint(dictionary_url)?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn list_versions(&self, dictionary_url: &str) -> Result<Vec<VersionRecord>, ApiException> {
        let url = self.endpoint(&format!("{}versions/", with_slash(dictionary_url)))?;
        let versions: Vec<VersionRecord> = self.send(self.request(Method::GET, url)).await?;
        Ok(versions
            .into_iter()
            .filter(|v| v.id.as_str() != HEAD_VERSION)
            .collect())
    }

    async fn edit_version(
        &self,
        dictionary_url: &str,
        request: &EditVersionRequest,
    ) -> Result<VersionRecord, ApiException> {
        let url = self.endpoint(&format!("{}{}/", with_slash(dictionary_url), request.id))?;
        let body = ReleaseStatusPatch {
            released: request.released,
        };
        self.send(self.request(Method::PUT, url).json(&body)).await
    }

    async fn create_version(&self, dictionary_url: &str) -> Result<VersionRecord, ApiException> {
        let existing = self.list_versions(dictionary_url).await?;
        let body = CreateVersionRequest {
            id: next_version_id(&existing),
            released: false,
            description: None,
        };
        let url = self.endpoint(&format!("{}versions/", with_slash(dictionary_url)))?;
        self.send(self.request(Method::POST, url).json(&body)).await
    }

    async fn create_dictionary(
        &self,
        form: &NewDictionary,
    ) -> Result<DictionaryRecord, ApiException> {
        let url = self.endpoint(&format!("{}collections/", with_slash(&form.owner_url)))?;
        let body = CreateCollectionBody::from(form);
        self.send(self.request(Method::POST, url).json(&body)).await
    }
}

fn with_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// Next id for a new version: one past the highest numeric id, or a count
/// based id when no numeric ids exist yet or the highest one is saturated.
pub fn next_version_id(existing: &[VersionRecord]) -> VersionId {
    let highest = existing
        .iter()
        .filter_map(|v| v.id.as_str().trim().parse::<u64>().ok())
        .max();
    let by_count = existing.len() as u64 + 1;
    let next = highest
        .and_then(|n| n.checked_add(1))
        .unwrap_or(by_count);
    VersionId::new(next.to_string())
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
