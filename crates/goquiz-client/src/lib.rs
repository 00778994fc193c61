//! goquiz-client: Transports, session storage, and configuration.
//!
//! Implements the `Transport` and `SessionStore` seams of `goquiz-core` for
//! real use (HTTP via `reqwest`, a JSON session file) and for tests (a
//! scripted mock transport).

pub mod config;
pub mod http;
pub mod mock;
pub mod store;

pub use config::{create_services, load_config, load_config_from, ApiConfig, GoquizConfig};
pub use http::HttpTransport;
pub use mock::MockTransport;
pub use store::FileSessionStore;
