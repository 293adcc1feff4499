//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! entity factory and billing test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built targets and raw entity data
//! - `assertions`: Custom assertion helpers for matching and resolution
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use assertions::*;
pub use generators::*;

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Installs a test-friendly tracing subscriber once per process
///
/// Filtering follows `RUST_LOG`, e.g. `RUST_LOG=core_kernel=debug`.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}
