//! # Input Reader
//!
//! Reads the request description that drives one run: the identifiers of the
//! requisition (and of the purchasing document it became) and the list of
//! operations to perform.
//!
//! ```json
//! {
//!   "PurchaseRequisition": {
//!     "PurchaseRequisition": "10000001",
//!     "PurchaseRequisitionItem": {
//!       "PurchaseRequisitionItem": "10",
//!       "PurchasingDocument": "4500000001",
//!       "PurchasingDocumentItem": "10"
//!     }
//!   },
//!   "accepter": ["All"]
//! }
//! ```
//!
//! Any other top-level keys are ignored; missing identifiers read as empty strings.

pub mod error;

pub use error::*;

use crate::model::RequestIdentifiers;
use crate::operation::expand_accepter;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The request description as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestDescription {
    #[serde(rename = "PurchaseRequisition", default)]
    pub purchase_requisition: RequisitionInput,
    #[serde(default)]
    pub accepter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RequisitionInput {
    pub purchase_requisition: String,
    pub purchase_requisition_item: ItemInput,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemInput {
    pub purchase_requisition_item: String,
    pub purchasing_document: String,
    pub purchasing_document_item: String,
}

impl RequestDescription {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn identifiers(&self) -> RequestIdentifiers {
        let requisition = &self.purchase_requisition;
        let item = &requisition.purchase_requisition_item;
        RequestIdentifiers::new(&requisition.purchase_requisition, &item.purchase_requisition_item)
            .with_purchasing_document(&item.purchasing_document, &item.purchasing_document_item)
    }

    /// Requested operation names, with the "all" forms of `accepter` expanded.
    pub fn operations(&self) -> Vec<String> {
        expand_accepter(&self.accepter)
    }
}

/// Reads a [`RequestDescription`] from a JSON file.
pub fn read_request(path: impl AsRef<Path>) -> Result<RequestDescription, InputError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading request description");

    let json = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    RequestDescription::from_json(&json).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
