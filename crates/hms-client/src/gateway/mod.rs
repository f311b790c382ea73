//! HTTP gateway: credential attachment, response classification and error
//! surfacing for every backend call.
//!
//! - [`ApiRequest`] describes a call (method, path, query, body, headers)
//! - [`classify`] maps status + body to an outcome with no side effects
//! - [`EffectHandler`] turns failures into notifications and handles an
//!   expired session
//! - [`Gateway`] ties them together over `reqwest`

mod classify;
mod client;
mod effects;
mod request;

pub use classify::{
    Classification, Envelope, ResponseClassifier, SESSION_EXPIRED_CODE, classify,
};
pub use client::{Gateway, GatewayBuilder};
pub use effects::{EffectHandler, SESSION_EXPIRED_MESSAGE};
pub use request::ApiRequest;
