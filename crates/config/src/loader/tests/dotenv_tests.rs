//! Tests for `.env` loading.
//!
//! Invariants / Assumptions:
//! - Each test runs in its own temporary working directory under `env_lock()`.
//! - Parse errors never echo the offending line, so secrets stay out of logs.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

const UNPARSEABLE: &str = "GRAPH_CLIENT_SECRET=hunter2-secret\nthis line has no equals sign\n";

/// Restores the working directory and `DOTENV_DISABLED` on drop.
struct DotenvSandbox {
    dir: TempDir,
    original_dir: PathBuf,
}

impl DotenvSandbox {
    fn new(dotenv: Option<&str>, disabled: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        if let Some(contents) = dotenv {
            fs::write(dir.path().join(".env"), contents).unwrap();
        }
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        unsafe {
            match disabled {
                Some(value) => std::env::set_var("DOTENV_DISABLED", value),
                None => std::env::remove_var("DOTENV_DISABLED"),
            }
        }
        Self { dir, original_dir }
    }

    fn load(&self) -> Result<ConfigLoader, ConfigError> {
        ConfigLoader::new().load_dotenv()
    }
}

impl Drop for DotenvSandbox {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
        unsafe {
            std::env::remove_var("DOTENV_DISABLED");
            std::env::remove_var("LICENSE_DOTENV_PROBE");
            std::env::remove_var("GRAPH_CLIENT_SECRET");
        }
    }
}

#[test]
fn test_missing_dotenv_is_ignored() {
    let _lock = env_lock().lock().unwrap();
    let sandbox = DotenvSandbox::new(None, None);
    assert!(sandbox.load().is_ok());
}

#[test]
fn test_valid_dotenv_populates_environment() {
    let _lock = env_lock().lock().unwrap();
    let sandbox = DotenvSandbox::new(Some("LICENSE_DOTENV_PROBE=loaded\n"), None);

    assert!(sandbox.load().is_ok());
    assert_eq!(
        std::env::var("LICENSE_DOTENV_PROBE").ok().as_deref(),
        Some("loaded")
    );
}

#[test]
fn test_unparseable_dotenv_hides_secret_values() {
    let _lock = env_lock().lock().unwrap();
    let sandbox = DotenvSandbox::new(Some(UNPARSEABLE), None);

    let err = match sandbox.load() {
        Err(err) => err,
        Ok(_) => panic!("unparseable .env should fail"),
    };
    assert!(matches!(err, ConfigError::DotenvParse { .. }));

    let message = err.to_string();
    assert!(!message.contains("hunter2-secret"), "leaked: {message}");
    assert!(message.contains("DOTENV_DISABLED"));
}

#[test]
fn test_disable_switch_values() {
    let _lock = env_lock().lock().unwrap();

    for (value, skipped) in [("1", true), ("true", true), ("false", false), ("yes", false)] {
        let sandbox = DotenvSandbox::new(Some(UNPARSEABLE), Some(value));
        let result = sandbox.load();
        assert_eq!(
            result.is_ok(),
            skipped,
            "DOTENV_DISABLED={value} in {}",
            sandbox.dir.path().display()
        );
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_dotenv_is_an_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let _lock = env_lock().lock().unwrap();
    let sandbox = DotenvSandbox::new(Some("LICENSE_DOTENV_PROBE=1\n"), None);
    let env_path = sandbox.dir.path().join(".env");
    fs::set_permissions(&env_path, fs::Permissions::from_mode(0o000)).unwrap();

    let result = sandbox.load();
    fs::set_permissions(&env_path, fs::Permissions::from_mode(0o644)).unwrap();

    // Root can read the file regardless of mode.
    if let Err(err) = result {
        assert!(
            matches!(err, ConfigError::DotenvIo { .. }),
            "expected DotenvIo, got {err}"
        );
    }
}
