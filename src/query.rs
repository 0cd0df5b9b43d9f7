//! `$filter` predicates for each entity set.
//!
//! Predicates have the form `Field1 eq 'v1' and Field2 eq 'v2'`. Values are not
//! validated; an empty identifier yields a predicate that simply matches
//! nothing. Single quotes inside a value are doubled, as OData string literals
//! require, so distinct values always produce distinct predicates.

use crate::model::RequestIdentifiers;

/// Builder for conjunctions of equality terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    terms: Vec<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: &str) -> Self {
        self.terms
            .push(format!("{field} eq '{}'", value.replace('\'', "''")));
        self
    }

    pub fn build(&self) -> String {
        self.terms.join(" and ")
    }
}

/// `A_PurchaseRequisitionHeader` by requisition number.
pub fn header(ids: &RequestIdentifiers) -> String {
    Filter::new()
        .eq("PurchaseRequisition", &ids.document_id)
        .build()
}

fn requisition_item(ids: &RequestIdentifiers) -> String {
    Filter::new()
        .eq("PurchaseRequisition", &ids.document_id)
        .eq("PurchaseRequisitionItem", &ids.item_id)
        .build()
}

/// `A_PurchaseRequisitionItem` by requisition and item number.
pub fn item(ids: &RequestIdentifiers) -> String {
    requisition_item(ids)
}

/// `A_PurReqAddDelivery` by requisition and item number.
pub fn item_delivery_address(ids: &RequestIdentifiers) -> String {
    requisition_item(ids)
}

/// `A_PurReqnAcctAssgmt` by requisition and item number.
pub fn item_account(ids: &RequestIdentifiers) -> String {
    requisition_item(ids)
}

/// `A_PurchaseRequisitionItem` by the purchasing document it was converted into.
pub fn purchasing_document(ids: &RequestIdentifiers) -> String {
    Filter::new()
        .eq("PurchasingDocument", &ids.sub_document_id)
        .eq("PurchasingDocumentItem", &ids.sub_item_id)
        .build()
}
