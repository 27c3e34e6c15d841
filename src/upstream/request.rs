use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

pub const DEFAULT_PAGE: &str = "1";
pub const DEFAULT_LIMIT: &str = "10";

/// One upstream call: method, path, ordered query pairs, optional JSON body
/// and the bearer token taken from the session.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    bearer: Option<String>,
}

impl OutboundRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn list_query(mut self, list: &ListQuery) -> Self {
        self.query.extend(list.pairs());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach the session access token. `None` leaves the call unauthenticated.
    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    /// Path for logs, without query values.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.bearer {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    /// Resolve against the upstream base URL. Path segments and query values
    /// are percent-encoded; an empty query leaves no trailing `?`.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        Ok(url)
    }
}

/// Pagination and filter parameters for list endpoints.
///
/// Pairs are always emitted as `page, limit, status, search, documentStatus`,
/// and filters only when non-empty, so generated URLs are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: String,
    pub limit: String,
    pub status: String,
    pub search: String,
    pub document_status: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE.to_string(),
            limit: DEFAULT_LIMIT.to_string(),
            status: String::new(),
            search: String::new(),
            document_status: String::new(),
        }
    }
}

impl ListQuery {
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.clone()),
            ("limit".to_string(), self.limit.clone()),
        ];
        if !self.status.is_empty() {
            pairs.push(("status".to_string(), self.status.clone()));
        }
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        if !self.document_status.is_empty() {
            pairs.push(("documentStatus".to_string(), self.document_status.clone()));
        }
        pairs
    }
}

/// Inbound `?page&limit&status&search&documentStatus` as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub document_status: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> ListQuery {
        let or_default = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        let filter =
            |value: &Option<String>| value.as_deref().map(str::trim).unwrap_or("").to_string();

        ListQuery {
            page: or_default(&self.page, DEFAULT_PAGE),
            limit: or_default(&self.limit, DEFAULT_LIMIT),
            status: filter(&self.status),
            search: filter(&self.search),
            document_status: filter(&self.document_status),
        }
    }
}
