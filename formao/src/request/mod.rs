//! Request data the builder can fall back on
//!
//! When a form has no explicit action, the current request URL is used.
//! When it has no explicit instance, a request body is used to pre-fill
//! values (typically to re-display a submitted form with its errors).

use crate::model::Instance;

/// What the builder reads from an incoming request
pub trait RequestLike: Send + Sync {
    /// Request path and query, used as the default form action
    fn url(&self) -> Option<&str>;

    /// Parsed request body, used as the default instance
    ///
    /// An empty body counts as no body.
    fn body(&self) -> Option<&Instance>;
}

/// Plain request data, for callers outside an HTTP stack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRequest {
    url: Option<String>,
    body: Option<Instance>,
}

impl FormRequest {
    /// Request for `url` without a body
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            body: None,
        }
    }

    /// Attach a parsed body
    #[must_use]
    pub fn with_body(mut self, body: Instance) -> Self {
        self.body = Some(body);
        self
    }
}

impl RequestLike for FormRequest {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn body(&self) -> Option<&Instance> {
        self.body.as_ref().filter(|body| !body.is_empty())
    }
}

impl RequestLike for http::Request<Instance> {
    fn url(&self) -> Option<&str> {
        self.uri().path_and_query().map(http::uri::PathAndQuery::as_str)
    }

    fn body(&self) -> Option<&Instance> {
        Some(self.body()).filter(|body| !body.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_request() {
        let req = FormRequest::new("/projects/new");
        assert_eq!(req.url(), Some("/projects/new"));
        assert!(req.body().is_none());

        let req = req.with_body(Instance::new());
        assert!(req.body().is_none());

        let req = FormRequest::default().with_body(Instance::new().with("name", "x"));
        assert_eq!(req.url(), None);
        assert_eq!(req.body().and_then(|b| b.get("name")), Some(&json!("x")));
    }

    #[test]
    fn test_http_request() {
        let req = http::Request::builder()
            .method("POST")
            .uri("http://localhost/projects?draft=1")
            .body(Instance::new().with("name", "Launch"))
            .unwrap();
        assert_eq!(RequestLike::url(&req), Some("/projects?draft=1"));
        assert_eq!(
            RequestLike::body(&req).and_then(|b| b.get("name")),
            Some(&json!("Launch"))
        );
    }

    #[test]
    fn test_http_request_empty_body() {
        let req = http::Request::builder()
            .uri("/projects")
            .body(Instance::new())
            .unwrap();
        assert!(RequestLike::body(&req).is_none());
    }
}
