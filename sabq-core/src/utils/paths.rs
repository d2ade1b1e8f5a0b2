//! XDG Base Directory and application-specific path resolution.
//!
//! Sabq keeps three kinds of files: `config.toml` in the config directory,
//! the persisted settings document in the data directory and optional log
//! files in the state directory. All paths come from `directories-next`.
//!
//! - [`get_app_config_dir()`]: e.g., `~/.config/sabq`.
//! - [`get_app_data_dir()`]: e.g., `~/.local/share/sabq`.
//! - [`get_app_state_dir()`]: e.g., `~/.local/state/Sabq/Sabq`.
//!
//! Every function returns [`CoreError::Config(ConfigError::DirectoryUnavailable)`]
//! when the home directory cannot be determined.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Sabq";
const APPLICATION: &str = "Sabq";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the base directory for user state files (`$XDG_STATE_HOME` on Linux).
///
/// `directories-next` has no state directory for other platforms, so they
/// fall back to the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Directory holding `config.toml`.
///
/// # Examples
/// ```
/// match sabq_core::utils::paths::get_app_config_dir() {
///     Ok(path) => println!("App config directory: {}", path.display()),
///     Err(e) => eprintln!("Error getting app config dir: {}", e),
/// }
/// ```
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Directory holding the persisted settings document.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Data").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for log files: `ORGANIZATION/APPLICATION` below [`get_state_base_dir()`].
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base_state| base_state.join(ORGANIZATION).join(APPLICATION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_is_valid_path(res: Result<PathBuf, CoreError>, dir_type: &str) {
        match res {
            Ok(path) => {
                assert!(path.is_absolute(), "Path for {} is not absolute: {:?}", dir_type, path);
                assert!(!path.as_os_str().is_empty(), "Path for {} is empty", dir_type);
            }
            // CI containers without HOME cannot resolve any of these.
            Err(CoreError::Config(ConfigError::DirectoryUnavailable { .. })) => {}
            Err(e) => panic!("Expected Ok or DirectoryUnavailable for {}, got {:?}", dir_type, e),
        }
    }

    #[test]
    fn test_app_directories_resolve() {
        assert_is_valid_path(get_app_config_dir(), "App Config");
        assert_is_valid_path(get_app_data_dir(), "App Data");
        assert_is_valid_path(get_app_state_dir(), "App State");
    }

    #[test]
    fn test_app_state_dir_ends_with_application() {
        if let Ok(path) = get_app_state_dir() {
            assert!(path.ends_with(PathBuf::from(ORGANIZATION).join(APPLICATION)));
        }
    }
}
