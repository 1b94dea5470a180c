//! REST client for the restaurant backend.
//!
//! Every endpoint is an `async fn` on [`ApiClient`], grouped by area in the
//! submodules. Views spawn them with `spawn_local` and turn the result into
//! a component message.
//!
//! The backend is inconsistent about failures: some endpoints answer with a
//! non-2xx status, others with `200 {"success": false, "error": ..}`. Both
//! end up as an [`ApiError`].

mod admin;
mod auth;
mod menu;
mod orders;
mod reservations;
mod rider;
mod routing;

pub use auth::Authenticated;

use std::rc::Rc;

use common::config::ClientConfig;
use common::responses::{list_or_empty, Ack};
use gloo_net::http::{Method, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] gloo_net::Error),

    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered but refused the request.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Text for a toast: the backend's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(msg) if !msg.is_empty() => msg.clone(),
            ApiError::Status { body, .. } => serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }
}

/// Cheap to clone; views keep their own copy.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    token: Option<Rc<str>>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && self.token == other.token
    }
}

impl ApiClient {
    pub fn new(config: Rc<ClientConfig>) -> Self {
        Self {
            config,
            token: None,
        }
    }

    /// Same client, sending `Authorization: Bearer <token>`.
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            config: self.config.clone(),
            token: token.map(Rc::from),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.api_url(path);
        debug!("{method} {url}");
        let builder = RequestBuilder::new(&url).method(method);
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let builder = self.request(method, path);
        let response = match body {
            Some(body) => builder.json(body)?.send().await?,
            None => builder.send().await?,
        };
        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("{path} failed with {status}: {body}");
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Ok(response.json::<T>().await?)
    }

    /// A list endpoint; a body that is not an array reads as empty.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let value = self.get_json::<Value>(path).await?;
        Ok(list_or_empty(value))
    }

    /// Sends and only checks the status; the body is ignored.
    async fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body).await.map(|_| ())
    }

    /// Sends and expects a `{success, error?}` envelope.
    async fn call_acked<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, path, body).await?;
        let ack = response.json::<Ack>().await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(ack.error.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let rejected = ApiError::Rejected("Reservation slot taken".into());
        assert_eq!(rejected.user_message("Failed"), "Reservation slot taken");

        let status = ApiError::Status {
            status: 400,
            body: r#"{"error":"Order already dispatched"}"#.into(),
        };
        assert_eq!(status.user_message("Failed"), "Order already dispatched");

        let opaque = ApiError::Status {
            status: 500,
            body: "Internal Server Error".into(),
        };
        assert_eq!(opaque.user_message("Failed to cancel order"), "Failed to cancel order");
        assert_eq!(ApiError::Rejected(String::new()).user_message("Failed"), "Failed");
    }

    #[test]
    fn clients_compare_by_config_and_token() {
        let client = ApiClient::new(Rc::new(ClientConfig::default()));
        assert!(client == client.clone());
        assert!(client != client.with_token(Some("t")));
        assert!(client.with_token(Some("t")) == client.with_token(Some("t")));
    }
}
