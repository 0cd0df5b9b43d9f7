//! # Observability & Tracing
//!
//! Installs the global `tracing` subscriber. Call [`setup_tracing`] once, at the
//! top of `main`.
//!
//! ## What Gets Traced
//!
//! - **Fetch steps**: one `info` line per successful step (entity set, URL,
//!   record count) and one `error` line per failed step
//! - **Payloads**: the decoded records, at `debug`
//! - **Branches**: every operation runs inside its own span, so nested lines
//!   show which chain issued them
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show decoded payloads and request details
//! RUST_LOG=debug cargo run
//!
//! # Only this crate at debug
//! RUST_LOG=odata_framework=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO operation: Fetched entity_set="A_PurchaseRequisitionHeader" url=... records=1 name="Header"
//! ERROR operation: Fetch failed entity_set="A_PurReqnAcctAssgmt" url=... error=API request error: HTTP 404: ... name="ItemAccount"
//! ```

/// Initializes structured logging, filtered by the `RUST_LOG` environment variable.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
