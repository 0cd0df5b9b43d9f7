//! Account assignment of a requisition item (`A_PurReqnAcctAssgmt`).
use odata_framework::ODataEntity;
use serde::Deserialize;

pub const ACCOUNT_SET: &str = "A_PurReqnAcctAssgmt";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemAccount {
    pub purchase_requisition: String,
    pub purchase_requisition_item: String,
    pub purchase_reqn_acct_assgmt_number: Option<String>,
    pub cost_center: Option<String>,
    #[serde(rename = "GLAccount")]
    pub gl_account: Option<String>,
    pub business_area: Option<String>,
    pub controlling_area: Option<String>,
    pub profit_center: Option<String>,
    pub functional_area: Option<String>,
    pub master_fixed_asset: Option<String>,
    pub project_network: Option<String>,
    #[serde(rename = "WBSElement")]
    pub wbs_element: Option<String>,
    #[serde(rename = "OrderID")]
    pub order_id: Option<String>,
    pub sales_order: Option<String>,
    pub sales_order_item: Option<String>,
    pub quantity: Option<String>,
    pub multiple_acct_assgmt_distr_percent: Option<String>,
    pub pur_reqn_net_amount: Option<String>,
    pub is_deleted: Option<bool>,
}

impl ODataEntity for ItemAccount {
    const ENTITY_SET: &'static str = ACCOUNT_SET;
}
