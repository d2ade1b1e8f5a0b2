//! # Sabq Core Library (`sabq-core`)
//!
//! Foundation shared by the Sabq appearance layer:
//!
//! - **Error Handling**: [`CoreError`] with [`ConfigError`] and [`LoggingError`].
//! - **Color**: [`Color`] parsing of hex, `rgb()`, `hsl()` and `oklch()` strings, plus
//!   OKLab lightness used by the accessibility heuristic.
//! - **Configuration**: [`ConfigLoader`] reads `config.toml` into [`CoreConfig`].
//! - **Logging**: `tracing` subscriber setup via [`initialize_logging`].
//! - **Utilities**: filesystem, XDG paths and case conversion.
//!
//! ```rust,ignore
//! use sabq_core::{ConfigLoader, initialize_logging, CoreError};
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     initialize_logging(&core_config.logging, false)?;
//!     tracing::info!("Sabq core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{AppearanceConfig, ConfigLoader, CoreConfig, LoggingConfig, StorageConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_minimal_logging, initialize_logging};
pub use types::{perceptual_lightness, Color, ColorParseError};
pub use utils::{to_camel_case, to_kebab_case, truncate_string};
