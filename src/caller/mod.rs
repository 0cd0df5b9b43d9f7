//! # Purchase Requisition Caller
//!
//! The orchestrator: takes the identifiers and operation names of one run,
//! launches one task per known operation and waits for all of them.
//!
//! ## Outcome reporting
//!
//! [`PurchaseRequisitionCaller::run`] returns nothing. Each fetch step reports to
//! the injected [`FetchLogger`]; failures stop only the branch they happen in and
//! are never propagated to the caller.
//!
//! ## Dependency injection
//!
//! The request client and logger are passed in at construction, so tests can
//! run the real chains against
//! [`MockRequestClient`](odata_framework::mock::MockRequestClient) and
//! [`MemoryLogger`](odata_framework::mock::MemoryLogger).
//!
//! ```rust
//! use odata_framework::mock::{MemoryLogger, MockRequestClient};
//! use purchase_requisition_reads::caller::PurchaseRequisitionCaller;
//! use purchase_requisition_reads::model::RequestIdentifiers;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRequestClient::new();
//!     mock.expect_get("http://host/API_PURCHASEREQ_PROCESS_SRV/A_PurReqnAcctAssgmt")
//!         .return_body(r#"{"d":{"results":[]}}"#);
//!     let logger = Arc::new(MemoryLogger::new());
//!
//!     let caller =
//!         PurchaseRequisitionCaller::new("http://host", Arc::new(mock.clone()), logger.clone())
//!             .unwrap();
//!     caller.run(&RequestIdentifiers::new("10000001", "10"), &["ItemAccount", "Bogus"]).await;
//!
//!     assert_eq!(logger.len(), 1);
//!     mock.verify();
//! }
//! ```

mod chains;

use crate::model::{RequestIdentifiers, SERVICE};
use crate::operation::Operation;
use odata_framework::{FetchLogger, Fetcher, RequestClient};
use std::sync::Arc;
use tracing::{debug, error, info_span, Instrument};
use url::Url;

/// Runs retrieval operations against one purchase requisition service.
///
/// Cloning is cheap; clones share the client and logger.
#[derive(Clone)]
pub struct PurchaseRequisitionCaller {
    /// `{base_url}/API_PURCHASEREQ_PROCESS_SRV/`; the trailing slash makes
    /// relative links join below the service.
    service_root: Url,
    fetcher: Fetcher,
}

impl PurchaseRequisitionCaller {
    /// Fails only when `base_url` is not an absolute URL.
    pub fn new(
        base_url: &str,
        client: Arc<dyn RequestClient>,
        logger: Arc<dyn FetchLogger>,
    ) -> Result<Self, url::ParseError> {
        let service_root = Url::parse(&format!("{}/{}/", base_url.trim_end_matches('/'), SERVICE))?;
        Ok(Self {
            service_root,
            fetcher: Fetcher::new(client, logger),
        })
    }

    /// Runs every known operation in `operations` concurrently and returns once
    /// all of them have finished.
    ///
    /// Unknown names are skipped and repeated names run once. A failing branch
    /// never affects its siblings, and `run` itself cannot fail.
    pub async fn run<S: AsRef<str>>(&self, ids: &RequestIdentifiers, operations: &[S]) {
        let mut requested: Vec<Operation> = Vec::with_capacity(operations.len());
        for name in operations {
            let name = name.as_ref();
            match Operation::from_name(name) {
                Some(op) if requested.contains(&op) => {
                    debug!(operation = name, "Repeated operation skipped")
                }
                Some(op) => requested.push(op),
                None => debug!(operation = name, "Unknown operation skipped"),
            }
        }

        let mut handles = Vec::with_capacity(requested.len());
        for op in requested {
            let caller = self.clone();
            let ids = ids.clone();
            let span = info_span!("operation", name = %op);
            let handle =
                tokio::spawn(async move { caller.execute(op, &ids).await }.instrument(span));
            handles.push((op, handle));
        }

        for (op, handle) in handles {
            // A panicking branch is reported like any other failure.
            if let Err(e) = handle.await {
                error!(operation = %op, error = %e, "Operation task failed");
            }
        }
    }

    /// Runs the chain behind `op` on the current task.
    pub async fn execute(&self, op: Operation, ids: &RequestIdentifiers) {
        debug!(operation = %op, ?ids, "Operation started");
        match op {
            Operation::Header => {
                self.header(ids).await;
            }
            Operation::Item => {
                self.item(ids).await;
            }
            Operation::ItemDeliveryAddress => {
                self.item_delivery_address(ids).await;
            }
            Operation::ItemAccount => {
                self.item_account(ids).await;
            }
            Operation::PurchasingDocument => {
                self.purchasing_document(ids).await;
            }
        }
        debug!(operation = %op, "Operation finished");
    }
}
