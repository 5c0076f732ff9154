//! Client configuration for app-tmpl.
//!
//! Kubeconfig-style connection settings:
//! - Named connection contexts (server URL + timeout)
//! - `current-context` for default selection
//! - Defaults applied to every context
//!
//! The file lives at `<config dir>/apptmpl/client.yaml`; `APPTMPL_CONFIG_DIR`
//! overrides the directory.

pub mod client;
pub mod error;

use std::path::PathBuf;

pub use client::{
    client_config_path, load_client_config, load_client_config_from, save_client_config,
    save_client_config_to, ClientConfig, ClientDefaults, Context,
};
pub use error::{ConfigError, Result};

const APP_NAME: &str = "apptmpl";

/// Environment variable overriding the config directory.
///
/// Useful for testing and for keeping several setups side by side.
pub const CONFIG_DIR_ENV: &str = "APPTMPL_CONFIG_DIR";

/// Get the config directory for apptmpl.
///
/// Checks `APPTMPL_CONFIG_DIR` first, then falls back to the platform default.
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
