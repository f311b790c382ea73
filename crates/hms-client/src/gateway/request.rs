use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;

/// A fully described backend call, built before anything touches the
/// network.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base address, always starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Encode `params` as query-string pairs. `params` must serialize to a
    /// JSON object (or null); `null` members are left out and arrays repeat
    /// the key.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(params).map_err(GatewayError::Encode)?;
        self.query.extend(query_pairs(value)?);
        Ok(self)
    }

    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, GatewayError> {
        self.body = Some(serde_json::to_value(body).map_err(GatewayError::Encode)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Header names compare case-insensitively.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

fn encode_error(msg: String) -> GatewayError {
    GatewayError::Encode(<serde_json::Error as serde::ser::Error>::custom(msg))
}

fn scalar(key: &str, value: &Value) -> Result<Option<String>, GatewayError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(encode_error(format!(
            "query parameter '{key}' must be a scalar"
        ))),
    }
}

fn query_pairs(value: Value) -> Result<Vec<(String, String)>, GatewayError> {
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(encode_error(format!(
                "query parameters must be an object, got {other}"
            )));
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match &value {
            Value::Array(items) => {
                for item in items {
                    if let Some(v) = scalar(&key, item)? {
                        pairs.push((key.clone(), v));
                    }
                }
            }
            _ => {
                if let Some(v) = scalar(&key, &value)? {
                    pairs.push((key, v));
                }
            }
        }
    }
    Ok(pairs)
}
