//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a human-readable subscriber with the given filter directive,
/// e.g. `"classiflow=debug"`. Does nothing if a subscriber is already set.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}

/// Installs a JSON-lines subscriber for log shippers. Does nothing if a
/// subscriber is already set.
pub fn init_json_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing("classiflow=debug");
        init_tracing("classiflow=info");
        init_json_tracing("warn");
    }
}
