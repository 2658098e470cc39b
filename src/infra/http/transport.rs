use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart;
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::session::SessionStore;
use crate::infra::http::config::Config;
use crate::usecase::ports::transport::{ApiError, ApiTransport, FilePart};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// reqwest-backed `ApiTransport`. Every request carries the Accept/ApiKey
/// headers and the bearer token when one is present. A 401 from any request
/// clears the session store before the error reaches the caller.
pub struct HttpTransport {
    client: reqwest::Client,
    config: Config,
    session: Arc<SessionStore>,
}

impl HttpTransport {
    pub fn new(config: Config, session: Arc<SessionStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    fn url(&self, path: &str, query: &str) -> String {
        format!("{}{}{}", self.config.base_url, path, query)
    }

    fn apply_headers(&self, request: RequestBuilder, content_type: Option<&str>) -> RequestBuilder {
        let mut request = request
            .header(ACCEPT, "application/json")
            .header("ApiKey", &self.config.api_key);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        request
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        classify_response(status, &body, &self.session)
    }
}

/// Maps one raw response to the transport outcome. 401 is the process-wide
/// case: the session is cleared here, unconditionally, regardless of which
/// screen issued the request.
pub(crate) fn classify_response(
    status: u16,
    body: &str,
    session: &SessionStore,
) -> Result<Value, ApiError> {
    if status == 401 {
        warn!("received 401, clearing session");
        session.clear();
        return Err(ApiError::Unauthorized);
    }
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();
        return Err(ApiError::Status { status, message });
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str, query: &str) -> Result<Value, ApiError> {
        let url = self.url(path, query);
        debug!(%url, "GET");
        let request = self.apply_headers(self.client.get(&url), Some("application/json"));
        self.dispatch(request).await
    }

    async fn get_by_id(&self, path: &str, id: i64) -> Result<Value, ApiError> {
        self.get(path, &format!("?id={id}")).await
    }

    async fn post(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        let url = self.url(path, "");
        debug!(%url, "POST");
        let request = self
            .apply_headers(self.client.post(&url), Some("application/json"))
            .json(&payload);
        self.dispatch(request).await
    }

    async fn post_text_plain(&self, path: &str, body: String) -> Result<Value, ApiError> {
        let url = self.url(path, "");
        debug!(%url, "POST text/plain");
        let request = self
            .apply_headers(self.client.post(&url), Some("text/plain"))
            .body(body);
        self.dispatch(request).await
    }

    async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path, "");
        debug!(%url, "POST multipart");
        let mut form = multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        if let Some(file) = file {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|err| ApiError::Network(format!("failed to read upload: {err}")))?;
            let file_name = file
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            form = form.part(file.field, multipart::Part::bytes(bytes).file_name(file_name));
        }
        // reqwest sets the multipart boundary header itself.
        let request = self
            .apply_headers(self.client.post(&url), None)
            .multipart(form);
        self.dispatch(request).await
    }

    async fn put(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        let url = self.url(path, "");
        debug!(%url, "PUT");
        let request = self
            .apply_headers(self.client.put(&url), Some("application/json"))
            .json(&payload);
        self.dispatch(request).await
    }

    async fn delete_by_id(&self, path: &str, id: i64) -> Result<Value, ApiError> {
        let url = self.url(path, &format!("?id={id}"));
        debug!(%url, "DELETE");
        let request = self.apply_headers(self.client.delete(&url), Some("application/json"));
        self.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::session::Session;

    fn store_with_token() -> SessionStore {
        let store = SessionStore::in_memory();
        store.store(Session {
            token: Some("abc123".to_string()),
            ..Session::default()
        });
        store
    }

    #[test]
    fn unauthorized_clears_session_and_maps_error() {
        let session = store_with_token();

        let outcome = classify_response(401, "", &session);

        assert!(
            matches!(outcome, Err(ApiError::Unauthorized)),
            "401 should map to Unauthorized"
        );
        assert!(
            !session.is_authenticated(),
            "session must be cleared on 401 regardless of caller"
        );
    }

    #[test]
    fn server_error_keeps_session_and_carries_message() {
        let session = store_with_token();

        let outcome = classify_response(500, r#"{"message": "boom"}"#, &session);

        match outcome {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(session.is_authenticated(), "non-401 must not touch the session");
    }

    #[test]
    fn success_returns_raw_envelope_json() {
        let session = SessionStore::in_memory();

        let value = classify_response(200, r#"{"isSuccess": true, "result": 1}"#, &session)
            .expect("2xx json should parse");

        assert_eq!(value["isSuccess"], Value::Bool(true));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let session = SessionStore::in_memory();

        let outcome = classify_response(200, "not json", &session);

        assert!(matches!(outcome, Err(ApiError::Decode(_))));
    }
}
