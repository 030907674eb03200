//! Configuration management for the tenant license report tools.
//!
//! This crate provides types and loaders for managing Graph connection and
//! authentication settings from `.env` files, environment variables and
//! named profiles in a JSON config file.

pub mod constants;
mod loader;
pub mod profile_file;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use profile_file::{ProfileFile, default_config_path};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, ProfileConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
