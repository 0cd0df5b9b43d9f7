//! Identifiers that key one retrieval run.

/// Identifiers for one retrieval run.
///
/// `document_id`/`item_id` address the purchase requisition and its item;
/// `sub_document_id`/`sub_item_id` address the purchasing document (e.g. the
/// purchase order) the item was converted into. All values are opaque and are
/// passed to the service unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIdentifiers {
    pub document_id: String,
    pub item_id: String,
    pub sub_document_id: String,
    pub sub_item_id: String,
}

impl RequestIdentifiers {
    pub fn new(document_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            item_id: item_id.into(),
            ..Self::default()
        }
    }

    pub fn with_purchasing_document(
        mut self,
        sub_document_id: impl Into<String>,
        sub_item_id: impl Into<String>,
    ) -> Self {
        self.sub_document_id = sub_document_id.into();
        self.sub_item_id = sub_item_id.into();
        self
    }
}
