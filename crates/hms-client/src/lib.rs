//! Client library for the hospital management console.
//!
//! - [`gateway`]: the single HTTP path to the backend (bearer token,
//!   envelope classification, failure notifications, expired sessions)
//! - [`api`]: one wrapper per backend endpoint
//! - [`router`]: console route table and document titles
//! - [`session`], [`notify`], [`navigation`]: services injected into the
//!   gateway

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod navigation;
pub mod notify;
pub mod router;
pub mod session;

pub use config::ClientConfig;
pub use config::loader::load_config;
pub use error::{ConfigError, GatewayError, SessionError, GENERIC_FAILURE};
pub use gateway::{ApiRequest, Gateway, GatewayBuilder};
pub use navigation::{Navigator, RecordingNavigator};
pub use notify::{LogNotifier, Notification, NotificationKind, Notifier, QueueNotifier};
pub use router::{ResolvedRoute, Router, ViewId};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionState, SessionStore};
