//! Utility functions shared across Sabq crates.
//!
//! - [`fs`]: directory creation, reading, plain and atomic writes.
//! - [`paths`]: config, data and state directories via `directories-next`.
//! - [`string_utils`]: case conversion and truncation.

pub mod fs;
pub mod paths;
pub mod string_utils;

pub use fs::{ensure_dir_exists, read_to_string, write_atomically, write_string_to_file};
pub use paths::{get_app_config_dir, get_app_data_dir, get_app_state_dir};
pub use string_utils::{to_camel_case, to_kebab_case, truncate_string};
