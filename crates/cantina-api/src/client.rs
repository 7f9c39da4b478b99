// HTTP client for the back-office REST API
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection,
// envelope unwrapping and error mapping. Endpoint-specific code lives in the
// repositories of `cantina-core`; this module only knows transport mechanics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::CredentialStore;
use crate::envelope::{Envelope, EnvelopeStatus, ErrorBody, join_field_errors};
use crate::error::Error;
use crate::page::{Page, PageMeta, Pagination};
use crate::transport::TransportConfig;

/// Async client for the REST API.
///
/// All methods return the unwrapped `data` payload of the response envelope;
/// callers never see `{status, data}` wrappers or raw error bodies.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl HttpClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a transport config.
    ///
    /// `base_url` is the API root, e.g. `http://localhost:3001/api/v1`.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        credentials: Option<Arc<dyn CredentialStore>>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            timeout: transport.timeout,
            credentials,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        credentials: Option<Arc<dyn CredentialStore>>,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            timeout: TransportConfig::default().timeout,
            credentials,
        })
    }

    /// The API root every relative path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");
        self.send(self.http.get(url)).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");
        self.send(self.http.get(url).query(params)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        self.send(self.http.post(url).json(body)).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        self.send(self.http.post(url)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");
        self.send(self.http.put(url).json(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");
        self.send(self.http.patch(url).json(body)).await
    }

    /// PATCH without a request body.
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");
        self.send(self.http.patch(url)).await
    }

    /// DELETE, discarding whatever payload the server returns.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");
        let _: IgnoredAny = self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// GET a paginated listing and rename its entity-specific item array.
    ///
    /// The server answers `{<key>: [...], total, page, limit, totalPages}`;
    /// `key` differs per endpoint (`customers`, `products`, ...).
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        key: &str,
    ) -> Result<Page<T>, Error> {
        let body: Value = self.get_with_params(path, params).await?;
        reshape_page(body, key)
    }

    // ── Request execution ────────────────────────────────────────────

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, Error> {
        let resp = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.as_ref().and_then(|c| c.bearer_token()) {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Network(err)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED {
                warn!("API rejected the bearer token; invalidating credentials");
                if let Some(credentials) = &self.credentials {
                    credentials.invalidate();
                }
            }
            return Err(error_from_status(status, &raw));
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        let data = unwrap_envelope(&body)?;
        serde_json::from_value(data).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Strip the `{status, data, message}` envelope from a 2xx body.
///
/// Empty bodies and envelopes without `data` yield JSON `null`.
fn unwrap_envelope(body: &str) -> Result<Value, Error> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let envelope: Envelope = serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("malformed envelope: {e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })?;

    match envelope.status {
        EnvelopeStatus::Success => Ok(envelope.data.unwrap_or(Value::Null)),
        EnvelopeStatus::Error => Err(Error::Rejected {
            message: envelope.message,
        }),
    }
}

/// Map a non-success response to the tagged error type.
fn error_from_status(status: StatusCode, raw: &str) -> Error {
    let parsed: ErrorBody = serde_json::from_str(raw).unwrap_or_default();
    let message = parsed.message.filter(|m| !m.trim().is_empty());

    if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
        return Error::Validation {
            message: join_field_errors(&errors),
            field_errors: errors,
        };
    }

    match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized { message },
        StatusCode::NOT_FOUND => Error::NotFound { message },
        StatusCode::UNPROCESSABLE_ENTITY => Error::Validation {
            message: message.unwrap_or_else(|| status.to_string()),
            field_errors: Vec::new(),
        },
        _ => Error::Http {
            status: status.as_u16(),
            message,
        },
    }
}

/// Turn `{<key>: [...], total, page, limit, totalPages}` into a [`Page`].
fn reshape_page<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<Page<T>, Error> {
    let meta = PageMeta::deserialize(&body).map_err(|e| Error::Deserialization {
        message: format!("missing pagination fields: {e}"),
        body: body.to_string(),
    })?;

    let items = match body.get_mut(key) {
        Some(items) => items.take(),
        None => {
            return Err(Error::Deserialization {
                message: format!("listing has no `{key}` array"),
                body: body.to_string(),
            });
        }
    };

    let items: Vec<T> = serde_json::from_value(items).map_err(|e| Error::Deserialization {
        message: format!("invalid `{key}` items: {e}"),
        body: body.to_string(),
    })?;

    Ok(Page {
        items,
        pagination: Pagination::new(meta.page, meta.limit, meta.total, meta.total_pages),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = normalize_base_url("http://localhost:3001/api/v1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/v1/");
        assert_eq!(
            url.join("customers/42").unwrap().as_str(),
            "http://localhost:3001/api/v1/customers/42"
        );
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(unwrap_envelope("").unwrap(), Value::Null);
    }

    #[test]
    fn error_envelope_is_rejected() {
        let err = unwrap_envelope(r#"{"status":"error","message":"Insufficient stock"}"#)
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Insufficient stock"));
        assert!(matches!(err, Error::Rejected { .. }));
    }

    #[test]
    fn bare_payload_is_not_an_envelope() {
        let err = unwrap_envelope(r#"[{"id":"1"}]"#).unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[test]
    fn field_errors_win_over_status() {
        let err = error_from_status(
            StatusCode::BAD_REQUEST,
            r#"{"status":"error","message":"Validation failed","errors":[{"field":"name","message":"is required"}]}"#,
        );
        assert_eq!(err.server_message(), Some("name: is required"));
        assert_eq!(err.field_errors().len(), 1);
    }

    #[test]
    fn unparseable_error_body_keeps_status() {
        let err = error_from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(
            err,
            Error::Http {
                status: 502,
                message: None
            }
        ));
    }

    #[test]
    fn not_found_carries_server_message() {
        let err = error_from_status(
            StatusCode::NOT_FOUND,
            r#"{"status":"error","message":"Customer not found"}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), Some("Customer not found"));
    }

    #[test]
    fn reshape_renames_item_array() {
        let body = json!({
            "customers": [1, 2, 3],
            "total": 3,
            "page": 1,
            "limit": 10,
            "totalPages": 1
        });
        let page: Page<u32> = reshape_page(body, "customers").unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.pagination, Pagination::new(1, 10, 3, 1));
    }

    #[test]
    fn reshape_requires_the_key() {
        let body = json!({ "total": 0, "page": 1, "limit": 10, "totalPages": 0 });
        let result: Result<Page<u32>, _> = reshape_page(body, "products");
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }
}
