//! # Observability & Tracing
//!
//! Structured logging for the whole console: the order-item actor, the refresh
//! coordinator and the fetch tasks it spawns.
//!
//! The subscriber uses the compact format and hides module paths
//! (`with_target(false)`); spans show inline instead, e.g.
//! `fetch{generation=3}: Reload applied`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per reload and transition
//! RUST_LOG=debug cargo run     # plus every request, criteria and stale discard
//! RUST_LOG=meal_ops::refresh=debug cargo run
//! ```
//!
//! Typical `info` output for a transition:
//!
//! ```text
//! INFO apply_transition{id=item_3 from=pending to=preparing}: Transition stored
//! INFO Reload applied generation=2 total=6
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, filtered by `RUST_LOG` or `default` when
/// that is unset or invalid.
pub fn setup_tracing_with(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
