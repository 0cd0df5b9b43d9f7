//! Purchase requisition header (`A_PurchaseRequisitionHeader`).
use crate::model::link::{relation_link, Navigation};
use odata_framework::ODataEntity;
use serde::Deserialize;

pub const HEADER_SET: &str = "A_PurchaseRequisitionHeader";

/// Header of a purchase requisition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub purchase_requisition: String,
    pub purchase_requisition_type: Option<String>,
    pub pur_reqn_description: Option<String>,
    pub source_determination: Option<bool>,
    #[serde(rename = "to_PurchaseReqnItem")]
    pub to_item: Option<Navigation>,
}

impl Header {
    /// Link to the items of this requisition.
    pub fn item_link(&self) -> Option<&str> {
        relation_link(&self.to_item)
    }
}

impl ODataEntity for Header {
    const ENTITY_SET: &'static str = HEADER_SET;
}
