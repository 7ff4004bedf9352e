//! Tracing subscriber setup for hosts embedding the editing core.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `default_filter`
/// (e.g. `"info,sf_playback=debug"`).
///
/// Returns `false` if a global subscriber was already installed, which makes
/// this safe to call from every test.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Same as [`init_logging`] but routes output through the test writer so it is
/// captured per test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_test_logging();
        assert!(!init_logging("info"));
        tracing::debug!("logging initialized");
    }
}
