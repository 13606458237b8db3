//! Shared setup for unit and integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::application::services::HostService;
use crate::infrastructure::traits::RealFileSystem;

static TEST_SETUP: Once = Once::new();

/// Install a tracing subscriber once per test binary (RUST_LOG, default debug).
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

/// Write `content` as an SSH config named `config` inside `dir`.
pub fn write_ssh_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config");
    std::fs::write(&path, content).expect("write ssh config fixture");
    path
}

/// `HostService` on the real filesystem for `path`.
pub fn host_service(path: &Path) -> HostService {
    HostService::new(Arc::new(RealFileSystem), path)
}
