//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → main.rs (environment / command-line overrides)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! Per request:
//!     credential.rs resolves the upstream key from its source
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - The credential is the exception: the env source is read per request
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod credential;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credential::{Credential, CredentialSource};
pub use loader::{read_config, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, ProxyRouteConfig, ServerConfig, StaticFilesConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
