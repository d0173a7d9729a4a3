pub mod advice; // Health tips + specialist search links
pub mod api; // HTTP layer: page, JSON API, server lifecycle
pub mod config;
pub mod core_state; // Registry + OCR engine + session store
pub mod inference; // Feature layouts, classifiers, prediction invoker
pub mod pipeline; // Report image → OCR → lab values
pub mod session; // Per-session history, cached values, notices

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// built-in default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
