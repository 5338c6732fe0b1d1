//! Content API client
//!
//! Thin adapter over the Prismic-style REST API. Every query carries a ref
//! (a repository snapshot id); the client resolves the master ref from the
//! API metadata once and caches it, unless a preview ref overrides it.

use serde::Deserialize;
use tokio::sync::OnceCell;

use super::error::CmsError;
use crate::content::RawDocument;

/// Which chronological neighbor an adjacent query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The closest document published before the anchor
    Earlier,
    /// The closest document published after the anchor
    Later,
}

/// Per-request query options
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Preview ref token; when set, queries resolve draft revisions
    /// instead of the latest published ones
    pub preview_ref: Option<String>,
}

/// API metadata returned from the repository root endpoint
#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// One page of search results
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawDocument>,
    #[serde(default)]
    next_page: Option<String>,
}

/// Client for the headless content API
pub struct CmsClient {
    http: reqwest::Client,
    api_url: String,
    access_token: Option<String>,
    master_ref: OnceCell<String>,
}

impl CmsClient {
    /// Create a client for the given repository API endpoint
    pub fn new(api_url: &str, access_token: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.map(str::to_string),
            master_ref: OnceCell::new(),
        }
    }

    /// Fetch a single document by its uid, or `None` if it does not exist
    pub async fn fetch_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        opts: &QueryOptions,
    ) -> Result<Option<RawDocument>, CmsError> {
        let reference = self.resolve_ref(opts).await?;
        let response = self
            .search(&[
                ("ref", reference.as_str()),
                ("q", &uid_predicate(doc_type, uid)),
                ("pageSize", "1"),
            ])
            .await?;

        Ok(response.results.into_iter().next())
    }

    /// Fetch the chronological neighbor of the anchor document
    ///
    /// Returns `None` when no earlier/later published document exists,
    /// which is not an error.
    pub async fn fetch_adjacent(
        &self,
        doc_type: &str,
        anchor_id: &str,
        direction: Direction,
        opts: &QueryOptions,
    ) -> Result<Option<RawDocument>, CmsError> {
        let reference = self.resolve_ref(opts).await?;
        let response = self
            .search(&[
                ("ref", reference.as_str()),
                ("q", &type_predicate(doc_type)),
                ("orderings", orderings(direction)),
                ("after", anchor_id),
                ("pageSize", "1"),
            ])
            .await?;

        Ok(response.results.into_iter().next())
    }

    /// List all documents of a type, newest first
    ///
    /// Follows `next_page` until the result set is exhausted. Used for
    /// static path enumeration and the index page.
    pub async fn list_documents(
        &self,
        doc_type: &str,
        page_size: usize,
        opts: &QueryOptions,
    ) -> Result<Vec<RawDocument>, CmsError> {
        let reference = self.resolve_ref(opts).await?;
        let page_size = page_size.to_string();

        let mut documents = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .search(&[
                    ("ref", reference.as_str()),
                    ("q", &type_predicate(doc_type)),
                    ("orderings", "[document.first_publication_date desc]"),
                    ("pageSize", page_size.as_str()),
                    ("page", &page.to_string()),
                ])
                .await?;

            let next = next_page_number(page, &response);
            documents.extend(response.results);

            match next {
                Some(n) => page = n,
                None => break,
            }
        }

        Ok(documents)
    }

    /// Resolve the ref to query against: the preview token when present,
    /// otherwise the cached master ref
    async fn resolve_ref(&self, opts: &QueryOptions) -> Result<String, CmsError> {
        if let Some(preview) = &opts.preview_ref {
            return Ok(preview.clone());
        }

        let reference = self
            .master_ref
            .get_or_try_init(|| self.fetch_master_ref())
            .await?;
        Ok(reference.clone())
    }

    /// Fetch the repository metadata and pick out the master ref
    async fn fetch_master_ref(&self) -> Result<String, CmsError> {
        tracing::debug!("Resolving master ref from {}", self.api_url);

        let request = self.http.get(&self.api_url);
        let request = match &self.access_token {
            Some(token) => request.query(&[("access_token", token.as_str())]),
            None => request,
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Api { status, body });
        }

        let body = response.text().await?;
        let info: ApiInfo = serde_json::from_str(&body).map_err(CmsError::Malformed)?;
        master_ref(&info)
            .map(str::to_string)
            .ok_or(CmsError::MissingMasterRef)
    }

    /// Issue one search request against the documents endpoint
    async fn search(&self, params: &[(&str, &str)]) -> Result<SearchResponse, CmsError> {
        let url = format!("{}/documents/search", self.api_url);

        let mut request = self.http.get(&url).query(params);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Api { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(CmsError::Malformed)
    }
}

/// Predicate selecting all documents of a type
fn type_predicate(doc_type: &str) -> String {
    format!(r#"[[at(document.type,"{}")]]"#, doc_type)
}

/// Predicate selecting one document by uid
fn uid_predicate(doc_type: &str, uid: &str) -> String {
    format!(r#"[[at(my.{}.uid,"{}")]]"#, doc_type, uid)
}

/// Ordering clause for an adjacent query
///
/// Combined with `after=<anchor>`, descending order yields the closest
/// earlier-published document and ascending order the closest
/// later-published one.
fn orderings(direction: Direction) -> &'static str {
    match direction {
        Direction::Earlier => "[document.first_publication_date desc]",
        Direction::Later => "[document.first_publication_date]",
    }
}

/// Page to request after the current one, if the response announces one
///
/// Progress is driven by a local counter; the upstream page echo is not
/// trusted, so a response omitting it cannot stall the pagination loop.
fn next_page_number(current: u32, response: &SearchResponse) -> Option<u32> {
    response.next_page.as_ref().map(|_| current + 1)
}

/// Pick the master ref out of the API metadata
fn master_ref(info: &ApiInfo) -> Option<&str> {
    info.refs
        .iter()
        .find(|r| r.is_master_ref)
        .map(|r| r.reference.as_str())
}
