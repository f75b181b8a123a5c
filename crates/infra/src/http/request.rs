//! Immutable description of one API request.

use std::time::Duration;

use ecotrack_domain::UploadFile;
use reqwest::Method;
use serde_json::Value;

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(UploadFile),
}

/// Method, path, query, body, header overrides and timeout override of a
/// request. Built with [`RequestDescriptor::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn builder(method: Method, path: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder {
            inner: RequestDescriptor {
                method,
                path: path.into(),
                query: Vec::new(),
                body: None,
                headers: Vec::new(),
                timeout: None,
            },
        }
    }

    pub fn get(path: impl Into<String>) -> RequestDescriptorBuilder {
        Self::builder(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> RequestDescriptorBuilder {
        Self::builder(Method::POST, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Header override by name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// URL-encoded query string, empty when there are no parameters
    pub fn query_string(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }
        url::form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.query).finish()
    }

    /// Path plus query, as sent on the wire
    pub fn path_and_query(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }

    /// Stable name of the endpoint: `METHOD path`, without query values
    pub fn operation(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Key identifying identical requests: `METHOD path?query`
    pub fn dedup_key(&self) -> String {
        format!("{} {}", self.method, self.path_and_query())
    }
}

/// Builder for [`RequestDescriptor`]
#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    inner: RequestDescriptor,
}

impl RequestDescriptorBuilder {
    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.inner.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when `value` is set and non-blank
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.trim().is_empty() => self.query(key, v),
            _ => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.inner.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, file: UploadFile) -> Self {
        self.inner.body = Some(RequestBody::Multipart(file));
        self
    }

    /// Set a header override, replacing an earlier one with the same name
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.inner.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.inner.headers.push((name, value.into()));
        self
    }

    pub fn accept(self, media_type: &str) -> Self {
        self.header("Accept", media_type)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> RequestDescriptor {
        self.inner
    }
}
