//! # Purchase Requisition Reads
//!
//! Reads purchase requisition data from the SAP S/4HANA purchase requisition
//! OData service (`API_PURCHASEREQ_PROCESS_SRV`).
//!
//! One run takes a request description (requisition number, item number,
//! purchasing document and item, plus a list of operation names) and performs
//! every requested operation concurrently. Operations that read more than one
//! entity set follow the relation links of the records they receive, so the
//! child requests always hit exactly what the service says belongs to the
//! parent.
//!
//! ## Failure isolation
//!
//! Every fetch step reports its outcome to a [`FetchLogger`](odata_framework::FetchLogger).
//! A failing step ends its own chain and nothing else: sibling operations, and
//! the sibling branch of a fan-out, keep going. The run as a whole always
//! completes.
//!
//! ## Module Tour
//!
//! - [`caller`]: the orchestrator and the five fetch chains.
//! - [`operation`]: operation names and `accepter` expansion.
//! - [`query`]: `$filter` predicates per entity set.
//! - [`model`]: record shapes and relation links.
//! - [`input`]: the request description file.
//! - [`config`]: environment configuration.
//!
//! Transport, decoding, logging and test doubles live in the
//! [`odata_framework`] crate.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- ./Inputs/SDC_Purchase_Requisition_Header_sample.json
//! ```

pub mod caller;
pub mod config;
pub mod input;
pub mod model;
pub mod operation;
pub mod query;
