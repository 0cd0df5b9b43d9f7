//! The named retrieval operations a run can request.

use std::fmt;

/// Sentinel in the input's `accepter` list meaning "every operation".
pub const ALL_SENTINEL: &str = "All";

/// A retrieval operation, each backed by one fetch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Header, then its items, then each item's delivery address and account assignment.
    Header,
    /// Item, then its delivery address and account assignment.
    Item,
    ItemDeliveryAddress,
    ItemAccount,
    /// Requisition items looked up by the purchasing document they were converted into.
    PurchasingDocument,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Header,
        Operation::Item,
        Operation::ItemDeliveryAddress,
        Operation::ItemAccount,
        Operation::PurchasingDocument,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Header => "Header",
            Operation::Item => "Item",
            Operation::ItemDeliveryAddress => "ItemDeliveryAddress",
            Operation::ItemAccount => "ItemAccount",
            Operation::PurchasingDocument => "PurchasingDocument",
        }
    }

    /// Looks up an operation by its exact name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expands an `accepter` list: empty, or containing [`ALL_SENTINEL`], means
/// every operation name; otherwise the list is returned as given.
pub fn expand_accepter(accepter: &[String]) -> Vec<String> {
    if accepter.is_empty() || accepter.iter().any(|name| name == ALL_SENTINEL) {
        Operation::ALL.iter().map(|op| op.name().to_string()).collect()
    } else {
        accepter.to_vec()
    }
}
