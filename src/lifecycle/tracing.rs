//! # Logging
//!
//! Structured logs via `tracing`. The level comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=golflow_storefront::transport=debug cargo run
//! ```
//!
//! At `info` the stores report each refresh and mutation with its key:
//!
//! ```text
//! INFO Actor started entity_type="Cart"
//! INFO Refreshed key=alice size=1
//! INFO Action ok key=alice
//! ```
//!
//! At `debug` every outgoing request and its status is logged as well.

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
