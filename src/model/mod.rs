//! Result shapes of the purchase requisition service, plus the identifiers a
//! run is keyed by.
//!
//! Records are read-only projections: they are fetched, logged and dropped.
//! Key fields are required, so a record without them fails to decode; every
//! other field is optional.

pub mod account;
pub mod delivery_address;
pub mod header;
pub mod identifiers;
pub mod item;
pub mod link;

pub use account::*;
pub use delivery_address::*;
pub use header::*;
pub use identifiers::*;
pub use item::*;
pub use link::*;

/// Name of the OData service every entity set belongs to.
pub const SERVICE: &str = "API_PURCHASEREQ_PROCESS_SRV";
