use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::classify::ResponseClassifier;
use super::effects::EffectHandler;
use super::request::ApiRequest;
use crate::config::ClientConfig;
use crate::error::{ConfigError, GatewayError};
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::session::Session;

/// Single choke point for every backend call.
///
/// Attaches the bearer token, classifies the response and, when a notifier
/// is wired in, surfaces failures to the user.
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<Session>,
    classifier: ResponseClassifier,
    effects: Option<EffectHandler>,
}

pub struct GatewayBuilder {
    config: ClientConfig,
    session: Option<Arc<Session>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl GatewayBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: None,
            notifier: None,
            navigator: None,
        }
    }

    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Enables user-facing effects. Without a notifier the gateway only
    /// returns rejected outcomes.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> Result<Gateway, ConfigError> {
        self.config.validate()?;
        let timeout = self.config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(Session::in_memory()));
        let effects = self.notifier.map(|notifier| {
            EffectHandler::new(
                notifier,
                session.clone(),
                self.navigator,
                self.config.notification_duration(),
                self.config.login_path.clone(),
            )
        });

        tracing::debug!(
            base_url = %self.config.base_url,
            timeout_ms = self.config.timeout_ms,
            effects = effects.is_some(),
            "gateway configured"
        );

        Ok(Gateway {
            http,
            base_url: self.config.normalized_base_url(),
            timeout,
            session,
            classifier: ResponseClassifier::new(self.config.success_messages),
            effects,
        })
    }
}

impl Gateway {
    pub fn builder(config: ClientConfig) -> GatewayBuilder {
        GatewayBuilder::new(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn attach_credential(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Ok(Some(token)) => req.bearer_auth(token),
            Ok(None) => req,
            Err(e) => {
                tracing::warn!(error = %e, "session token unreadable; sending unauthenticated");
                req
            }
        }
    }

    fn reject(&self, error: GatewayError, session_expired: bool) -> GatewayError {
        if let Some(effects) = &self.effects {
            effects.apply(&error, session_expired);
        }
        error
    }

    fn transport_error(&self, err: &reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::transport(format!(
                "timeout of {}ms exceeded",
                self.timeout.as_millis()
            ))
        } else {
            GatewayError::transport(err.to_string())
        }
    }

    /// Issue a request and resolve with the envelope's `data` field.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "issuing request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // A caller-supplied Authorization header wins over the session token.
        if !request.has_header("authorization") {
            builder = self.attach_credential(builder);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(method = %request.method, %url, error = %e, "transport failure");
                return Err(self.reject(self.transport_error(&e), false));
            }
        };

        let status = resp.status().as_u16();
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(method = %request.method, %url, error = %e, "failed reading body");
                return Err(self.reject(self.transport_error(&e), false));
            }
        };

        let classification = self.classifier.classify(status, &body);
        match classification.outcome {
            Ok(data) => {
                tracing::debug!(method = %request.method, %url, status, "request succeeded");
                Ok(data)
            }
            Err(error) => {
                tracing::info!(
                    method = %request.method,
                    %url,
                    status,
                    session_expired = classification.session_expired,
                    error = %error,
                    "request rejected"
                );
                Err(self.reject(error, classification.session_expired))
            }
        }
    }

    /// Like [`send`](Self::send), then decode `data` into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, GatewayError> {
        let data = self.send(request).await?;
        serde_json::from_value(data).map_err(GatewayError::Decode)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_invalid_config() {
        let cfg = ClientConfig::default().with_base_url("nope");
        assert!(Gateway::builder(cfg).build().is_err());
    }

    #[test]
    fn builder_normalizes_base_url() {
        let cfg = ClientConfig::default().with_base_url("http://localhost:5000/");
        let gw = Gateway::builder(cfg).build().unwrap();
        assert_eq!(gw.base_url(), "http://localhost:5000");
        assert_eq!(gw.url("/patient/1"), "http://localhost:5000/patient/1");
    }
}
