//! Delivery address of a requisition item (`A_PurReqAddDelivery`).
use odata_framework::ODataEntity;
use serde::Deserialize;

pub const DELIVERY_ADDRESS_SET: &str = "A_PurReqAddDelivery";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemDeliveryAddress {
    pub purchase_requisition: String,
    pub purchase_requisition_item: String,
    #[serde(rename = "AddressID")]
    pub address_id: Option<String>,
    pub plant: Option<String>,
    pub full_name: Option<String>,
    pub care_of_name: Option<String>,
    pub street_name: Option<String>,
    pub house_number: Option<String>,
    pub district: Option<String>,
    pub city_name: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub fax_number: Option<String>,
    pub correspondence_language: Option<String>,
}

impl ODataEntity for ItemDeliveryAddress {
    const ENTITY_SET: &'static str = DELIVERY_ADDRESS_SET;
}
