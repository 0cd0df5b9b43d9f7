//! Purchase requisition item (`A_PurchaseRequisitionItem`).
use crate::model::link::{relation_link, Navigation};
use odata_framework::ODataEntity;
use serde::Deserialize;

pub const ITEM_SET: &str = "A_PurchaseRequisitionItem";

/// One item of a purchase requisition.
///
/// Also the result shape of purchasing document lookups, which query this
/// entity set by `PurchasingDocument`/`PurchasingDocumentItem`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub purchase_requisition: String,
    pub purchase_requisition_item: String,
    pub purchasing_document: Option<String>,
    pub purchasing_document_item: Option<String>,
    pub pur_reqn_release_status: Option<String>,
    pub purchase_requisition_type: Option<String>,
    pub purchasing_document_item_category: Option<String>,
    pub purchase_requisition_item_text: Option<String>,
    pub account_assignment_category: Option<String>,
    pub material: Option<String>,
    pub material_group: Option<String>,
    pub purchasing_document_category: Option<String>,
    pub requested_quantity: Option<String>,
    pub base_unit: Option<String>,
    pub purchase_requisition_price: Option<String>,
    pub pur_reqn_price_quantity: Option<String>,
    pub pur_reqn_item_currency: Option<String>,
    pub plant: Option<String>,
    pub storage_location: Option<String>,
    pub company_code: Option<String>,
    pub purchasing_organization: Option<String>,
    pub purchasing_group: Option<String>,
    pub supplier: Option<String>,
    pub fixed_supplier: Option<String>,
    pub created_by_user: Option<String>,
    pub creation_date: Option<String>,
    pub delivery_date: Option<String>,
    #[serde(rename = "to_PurchaseReqnDeliveryAddress")]
    pub to_delivery_address: Option<Navigation>,
    #[serde(rename = "to_PurchaseReqnAcctAssgmt")]
    pub to_account: Option<Navigation>,
}

impl Item {
    pub fn delivery_address_link(&self) -> Option<&str> {
        relation_link(&self.to_delivery_address)
    }

    pub fn account_link(&self) -> Option<&str> {
        relation_link(&self.to_account)
    }
}

impl ODataEntity for Item {
    const ENTITY_SET: &'static str = ITEM_SET;
}
