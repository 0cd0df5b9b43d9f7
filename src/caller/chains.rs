//! The five fetch chains.
//!
//! Every chain is a sequence of [`step`](PurchaseRequisitionCaller::step) calls.
//! A step receives an optional [`Locator`]; when the previous step failed,
//! returned no records or its first record had no relation link, there is no
//! locator and the chain ends there without a request and without an error
//! entry.
//!
//! Relation links are resolved against the service root the way a browser
//! resolves an `href`: absolute links are kept, root-relative links replace the
//! path and plain relative links land below the service.

use super::PurchaseRequisitionCaller;
use crate::model::{Header, Item, ItemAccount, ItemDeliveryAddress, RequestIdentifiers};
use crate::query;
use odata_framework::{ApiRequest, ODataEntity};
use tracing::{debug, warn};

/// Where a step reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Locator<'a> {
    /// The step's entity set under the service root, narrowed by `$filter`.
    Filter(String),
    /// A relation link taken from a parent record, requested without query parameters.
    Link(&'a str),
}

/// Relation link of the first record, if there is a first record and it has one.
fn first_link<'a, T>(records: &'a [T], link: fn(&T) -> Option<&str>) -> Option<Locator<'a>> {
    records.first().and_then(link).map(Locator::Link)
}

impl PurchaseRequisitionCaller {
    /// Builds the request for `locator`. A link that cannot be resolved to a URL
    /// yields `None`.
    pub(crate) fn request_for<T: ODataEntity>(&self, locator: Locator<'_>) -> Option<ApiRequest> {
        match locator {
            Locator::Filter(filter) => Some(
                ApiRequest::get(format!("{}{}", self.service_root, T::ENTITY_SET))
                    .with_filter(filter),
            ),
            Locator::Link(link) => match self.service_root.join(link) {
                Ok(url) => Some(ApiRequest::get(url.as_str())),
                Err(e) => {
                    warn!(entity_set = T::ENTITY_SET, link, error = %e, "Unusable relation link");
                    None
                }
            },
        }
    }

    /// One fetch step. `None` means the chain stops here.
    async fn step<T: ODataEntity>(&self, locator: Option<Locator<'_>>) -> Option<Vec<T>> {
        let Some(locator) = locator else {
            debug!(entity_set = T::ENTITY_SET, "Nothing to follow, branch ends");
            return None;
        };

        let request = self.request_for::<T>(locator)?;
        let records = self.fetcher.step::<T>(request).await?;
        if records.is_empty() {
            debug!(entity_set = T::ENTITY_SET, "No records");
        }
        Some(records)
    }

    /// Header → items → delivery address and account assignment.
    pub(crate) async fn header(&self, ids: &RequestIdentifiers) -> Option<()> {
        let headers = self
            .step::<Header>(Some(Locator::Filter(query::header(ids))))
            .await?;
        let items = self
            .step::<Item>(first_link(&headers, Header::item_link))
            .await?;
        self.item_children(&items).await;
        Some(())
    }

    /// Item → delivery address and account assignment.
    pub(crate) async fn item(&self, ids: &RequestIdentifiers) -> Option<()> {
        let items = self
            .step::<Item>(Some(Locator::Filter(query::item(ids))))
            .await?;
        self.item_children(&items).await;
        Some(())
    }

    /// Follows both relation links of the first item. The two fetches run
    /// side by side and neither depends on the other's outcome.
    async fn item_children(&self, items: &[Item]) {
        let Some(item) = items.first() else {
            return;
        };
        tokio::join!(
            self.step::<ItemDeliveryAddress>(item.delivery_address_link().map(Locator::Link)),
            self.step::<ItemAccount>(item.account_link().map(Locator::Link)),
        );
    }

    pub(crate) async fn item_delivery_address(
        &self,
        ids: &RequestIdentifiers,
    ) -> Option<Vec<ItemDeliveryAddress>> {
        self.step(Some(Locator::Filter(query::item_delivery_address(ids))))
            .await
    }

    pub(crate) async fn item_account(&self, ids: &RequestIdentifiers) -> Option<Vec<ItemAccount>> {
        self.step(Some(Locator::Filter(query::item_account(ids))))
            .await
    }

    /// Requisition items by purchasing document, read from the item entity set.
    pub(crate) async fn purchasing_document(&self, ids: &RequestIdentifiers) -> Option<Vec<Item>> {
        self.step(Some(Locator::Filter(query::purchasing_document(ids))))
            .await
    }
}
