use async_trait::async_trait;
use odata_framework::mock::{channel_client, expect_request, MemoryLogger, MockRequestClient};
use odata_framework::{ApiRequest, ApiResponse, FetchError, Outcome, RequestClient};
use purchase_requisition_reads::caller::PurchaseRequisitionCaller;
use purchase_requisition_reads::model::RequestIdentifiers;
use purchase_requisition_reads::operation::Operation;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "http://sap.test/odata";
const ROOT: &str = "http://sap.test/odata/API_PURCHASEREQ_PROCESS_SRV";
const ITEM_FILTER: &str = "PurchaseRequisition eq '10000001' and PurchaseRequisitionItem eq '10'";
const EMPTY: &str = r#"{"d":{"results":[]}}"#;

// --- Fixtures ---

fn ids() -> RequestIdentifiers {
    RequestIdentifiers::new("10000001", "10").with_purchasing_document("4500000001", "10")
}

fn url(path: &str) -> String {
    format!("{ROOT}/{path}")
}

fn items_link() -> String {
    url("A_PurchaseRequisitionHeader('10000001')/to_PurchaseReqnItem")
}

fn delivery_link() -> String {
    url("A_PurchaseRequisitionItem(PurchaseRequisition='10000001',PurchaseRequisitionItem='10')/to_PurchaseReqnDeliveryAddress")
}

fn account_link() -> String {
    url("A_PurchaseRequisitionItem(PurchaseRequisition='10000001',PurchaseRequisitionItem='10')/to_PurchaseReqnAcctAssgmt")
}

fn deferred(uri: &str) -> serde_json::Value {
    serde_json::json!({ "__deferred": { "uri": uri } })
}

fn header_body(items_link: Option<&str>) -> String {
    let mut record = serde_json::json!({
        "PurchaseRequisition": "10000001",
        "PurchaseRequisitionType": "NB",
        "PurReqnDescription": "Office supplies",
    });
    if let Some(link) = items_link {
        record["to_PurchaseReqnItem"] = deferred(link);
    }
    serde_json::json!({ "d": { "results": [record] } }).to_string()
}

fn item_body(delivery_link: Option<&str>, account_link: Option<&str>) -> String {
    let mut record = serde_json::json!({
        "PurchaseRequisition": "10000001",
        "PurchaseRequisitionItem": "10",
        "Material": "TG11",
        "Plant": "1010",
    });
    if let Some(link) = delivery_link {
        record["to_PurchaseReqnDeliveryAddress"] = deferred(link);
    }
    if let Some(link) = account_link {
        record["to_PurchaseReqnAcctAssgmt"] = deferred(link);
    }
    serde_json::json!({ "d": { "results": [record] } }).to_string()
}

fn delivery_body() -> String {
    serde_json::json!({ "d": { "results": [{
        "PurchaseRequisition": "10000001",
        "PurchaseRequisitionItem": "10",
        "AddressID": "22000001",
        "CityName": "Walldorf",
    }] } })
    .to_string()
}

fn account_body() -> String {
    serde_json::json!({ "d": { "results": [{
        "PurchaseRequisition": "10000001",
        "PurchaseRequisitionItem": "10",
        "CostCenter": "10101101",
        "GLAccount": "61008000",
    }] } })
    .to_string()
}

fn caller(mock: &MockRequestClient, logger: &Arc<MemoryLogger>) -> PurchaseRequisitionCaller {
    PurchaseRequisitionCaller::new(BASE_URL, Arc::new(mock.clone()), logger.clone()).unwrap()
}

fn fetched(logger: &MemoryLogger, entity_set: &str) -> Vec<usize> {
    logger
        .entries()
        .into_iter()
        .filter(|e| e.entity_set == entity_set)
        .filter_map(|e| match e.outcome {
            Outcome::Fetched { records, .. } => Some(records),
            Outcome::Failed(_) => None,
        })
        .collect()
}

// --- Single-step operations ---

#[tokio::test]
async fn test_item_account_end_to_end() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurReqnAcctAssgmt"))
        .with_filter("PurchaseRequisition eq '10000001' and PurchaseRequisitionItem eq '00010'")
        .return_body(account_body());
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger)
        .run(&RequestIdentifiers::new("10000001", "00010"), &["ItemAccount"])
        .await;

    assert_eq!(mock.call_count(), 1);
    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_set, "A_PurReqnAcctAssgmt");
    assert_eq!(entries[0].url, url("A_PurReqnAcctAssgmt"));
    match &entries[0].outcome {
        Outcome::Fetched { records, payload } => {
            assert_eq!(*records, 1);
            assert!(payload.contains("61008000"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    mock.verify();
}

#[tokio::test]
async fn test_unknown_operations_make_no_requests() {
    let mock = MockRequestClient::new();
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger)
        .run(&ids(), &["Bogus", "header", "All", ""])
        .await;

    assert_eq!(mock.call_count(), 0);
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_only_requested_operations_run() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurReqAddDelivery"))
        .with_filter(ITEM_FILTER)
        .return_body(EMPTY);
    mock.expect_get(url("A_PurchaseRequisitionItem"))
        .with_filter("PurchasingDocument eq '4500000001' and PurchasingDocumentItem eq '10'")
        .return_body(item_body(None, None));
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger)
        .run(&ids(), &["ItemDeliveryAddress", "PurchasingDocument", "Bogus"])
        .await;

    assert_eq!(mock.call_count(), 2);
    assert_eq!(fetched(&logger, "A_PurReqAddDelivery"), vec![0]);
    assert_eq!(fetched(&logger, "A_PurchaseRequisitionItem"), vec![1]);
    mock.verify();
}

#[tokio::test]
async fn test_repeated_operation_runs_once() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurReqnAcctAssgmt"))
        .with_filter(ITEM_FILTER)
        .return_body(EMPTY);
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger)
        .run(&ids(), &["ItemAccount", "ItemAccount"])
        .await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(logger.len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_decode_failure_is_logged() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurReqnAcctAssgmt"))
        .return_body("<html>maintenance</html>");
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["ItemAccount"]).await;

    let failures = logger.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0].outcome, Outcome::Failed(e) if e.is_decode()));
}

// --- Chains ---

#[tokio::test]
async fn test_header_chain_follows_relation_links() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .with_filter("PurchaseRequisition eq '10000001'")
        .return_body(header_body(Some(&items_link())));
    mock.expect_get(items_link())
        .return_body(item_body(Some(&delivery_link()), Some(&account_link())));
    mock.expect_get(delivery_link()).return_body(delivery_body());
    mock.expect_get(account_link()).return_body(account_body());
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Header"]).await;

    assert_eq!(mock.call_count(), 4);
    assert_eq!(logger.len(), 4);
    assert!(logger.failures().is_empty());

    // Links are requested as given, without a filter.
    for call in mock.calls().iter().skip(1) {
        assert!(call.query.is_empty(), "unexpected query on {}", call.url);
    }
    mock.verify();
}

#[tokio::test]
async fn test_relative_links_resolve_against_service_root() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_body(header_body(Some(
            "A_PurchaseRequisitionHeader('10000001')/to_PurchaseReqnItem",
        )));
    mock.expect_get(items_link()).return_body(EMPTY);
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Header"]).await;

    assert_eq!(mock.call_count(), 2);
    assert!(logger.failures().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_root_relative_links_keep_a_single_service_path() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_body(header_body(Some(
            "/odata/API_PURCHASEREQ_PROCESS_SRV/A_PurchaseRequisitionHeader('10000001')/to_PurchaseReqnItem",
        )));
    mock.expect_get(items_link()).return_body(EMPTY);
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Header"]).await;

    assert_eq!(mock.call_count(), 2);
    assert!(logger.failures().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_failed_first_step_stops_only_its_chain() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_status(500, "internal error");
    mock.expect_get(url("A_PurReqnAcctAssgmt"))
        .with_filter(ITEM_FILTER)
        .return_body(account_body());
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger)
        .run(&ids(), &["Header", "ItemAccount"])
        .await;

    assert_eq!(mock.call_count(), 2);
    let failures = logger.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].entity_set, "A_PurchaseRequisitionHeader");
    assert!(matches!(
        &failures[0].outcome,
        Outcome::Failed(FetchError::Transport(message)) if message.starts_with("HTTP 500")
    ));
    assert_eq!(fetched(&logger, "A_PurReqnAcctAssgmt"), vec![1]);
    mock.verify();
}

#[tokio::test]
async fn test_failed_middle_step_stops_the_rest_of_the_chain() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_body(header_body(Some(&items_link())));
    mock.expect_get(items_link())
        .return_err(FetchError::Transport("connection reset".into()));
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Header"]).await;

    assert_eq!(mock.call_count(), 2);
    assert_eq!(mock.calls_to("to_PurchaseReqnDeliveryAddress"), 0);
    assert_eq!(mock.calls_to("to_PurchaseReqnAcctAssgmt"), 0);
    let failures = logger.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].entity_set, "A_PurchaseRequisitionItem");
    assert_eq!(fetched(&logger, "A_PurchaseRequisitionHeader"), vec![1]);
    mock.verify();
}

#[tokio::test]
async fn test_undecodable_middle_step_stops_the_rest_of_the_chain() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionItem"))
        .with_filter(ITEM_FILTER)
        .return_body(r#"{"d":{"results":[{"Material":"TG11"}]}}"#);
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Item"]).await;

    assert_eq!(mock.call_count(), 1);
    let failures = logger.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0].outcome, Outcome::Failed(e) if e.is_decode()));
    mock.verify();
}

#[tokio::test]
async fn test_fan_out_branches_are_isolated() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionItem"))
        .with_filter(ITEM_FILTER)
        .return_body(item_body(Some(&delivery_link()), Some(&account_link())));
    mock.expect_get(delivery_link())
        .return_err(FetchError::Transport("connection reset".into()));
    mock.expect_get(account_link()).return_body(account_body());
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Item"]).await;

    assert_eq!(mock.call_count(), 3);
    let failures = logger.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].entity_set, "A_PurReqAddDelivery");
    assert_eq!(fetched(&logger, "A_PurReqnAcctAssgmt"), vec![1]);
    mock.verify();
}

#[tokio::test]
async fn test_empty_parent_ends_chain_without_error() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_body(EMPTY);
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Header"]).await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(fetched(&logger, "A_PurchaseRequisitionHeader"), vec![0]);
    assert!(logger.failures().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_missing_link_ends_branch_without_error() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionItem"))
        .return_body(item_body(Some(&delivery_link()), None));
    mock.expect_get(delivery_link()).return_body(delivery_body());
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Item"]).await;

    assert_eq!(mock.call_count(), 2);
    assert_eq!(logger.len(), 2);
    assert!(logger.failures().is_empty());
    assert_eq!(mock.calls_to("to_PurchaseReqnAcctAssgmt"), 0);
    mock.verify();
}

#[tokio::test]
async fn test_header_without_item_link_stops_after_header() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_body(header_body(None));
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger).run(&ids(), &["Header"]).await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(fetched(&logger, "A_PurchaseRequisitionHeader"), vec![1]);
    mock.verify();
}

// --- Concurrency ---

#[tokio::test]
async fn test_hung_branch_does_not_block_siblings() {
    let (client, mut receiver) = channel_client(8);
    let logger = Arc::new(MemoryLogger::new());
    let caller =
        PurchaseRequisitionCaller::new(BASE_URL, Arc::new(client), logger.clone()).unwrap();

    let run = tokio::spawn(async move {
        caller
            .run(&ids(), &["ItemAccount", "ItemDeliveryAddress"])
            .await
    });

    // Both requests are in flight before either is answered.
    let first = expect_request(&mut receiver).await.unwrap();
    let second = expect_request(&mut receiver).await.unwrap();
    let (hung, answered) = if first.request.url.ends_with("A_PurReqnAcctAssgmt") {
        (first, second)
    } else {
        (second, first)
    };
    assert!(answered.request.url.ends_with("A_PurReqAddDelivery"));

    answered
        .respond_to
        .send(Ok(ApiResponse::ok(delivery_body())))
        .unwrap();

    tokio::time::timeout(Duration::from_secs(1), async {
        while logger.is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("delivery address branch did not finish");

    assert_eq!(fetched(&logger, "A_PurReqAddDelivery"), vec![1]);
    assert!(!run.is_finished());

    hung.respond_to
        .send(Ok(ApiResponse::ok(account_body())))
        .unwrap();
    run.await.unwrap();

    assert_eq!(logger.len(), 2);
    assert!(logger.failures().is_empty());
}

#[tokio::test]
async fn test_all_operations_run_concurrently() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurchaseRequisitionHeader"))
        .return_body(header_body(Some(&items_link())));
    mock.expect_get(items_link())
        .return_body(item_body(Some(&delivery_link()), Some(&account_link())));
    mock.expect_get(url("A_PurchaseRequisitionItem"))
        .with_filter(ITEM_FILTER)
        .return_body(item_body(Some(&delivery_link()), Some(&account_link())));
    // Header and Item chains both reach the item's children.
    for _ in 0..2 {
        mock.expect_get(delivery_link()).return_body(delivery_body());
        mock.expect_get(account_link()).return_body(account_body());
    }
    mock.expect_get(url("A_PurReqAddDelivery"))
        .with_filter(ITEM_FILTER)
        .return_body(delivery_body());
    mock.expect_get(url("A_PurReqnAcctAssgmt"))
        .with_filter(ITEM_FILTER)
        .return_body(account_body());
    mock.expect_get(url("A_PurchaseRequisitionItem"))
        .with_filter("PurchasingDocument eq '4500000001' and PurchasingDocumentItem eq '10'")
        .return_body(EMPTY);
    let logger = Arc::new(MemoryLogger::new());

    caller(&mock, &logger)
        .run(
            &ids(),
            &[
                "Header",
                "Item",
                "ItemDeliveryAddress",
                "ItemAccount",
                "PurchasingDocument",
            ],
        )
        .await;

    assert_eq!(mock.call_count(), 10);
    assert_eq!(logger.len(), 10);
    assert!(logger.failures().is_empty());
    assert_eq!(fetched(&logger, "A_PurReqAddDelivery").len(), 3);
    assert_eq!(fetched(&logger, "A_PurReqnAcctAssgmt").len(), 3);
    mock.verify();
}

/// Registers every response the given operations need, following all links.
fn expect_operation(mock: &MockRequestClient, op: Operation) {
    let expect_children = || {
        mock.expect_get(delivery_link()).return_body(delivery_body());
        mock.expect_get(account_link()).return_body(account_body());
    };
    match op {
        Operation::Header => {
            mock.expect_get(url("A_PurchaseRequisitionHeader"))
                .with_filter("PurchaseRequisition eq '10000001'")
                .return_body(header_body(Some(&items_link())));
            mock.expect_get(items_link())
                .return_body(item_body(Some(&delivery_link()), Some(&account_link())));
            expect_children();
        }
        Operation::Item => {
            mock.expect_get(url("A_PurchaseRequisitionItem"))
                .with_filter(ITEM_FILTER)
                .return_body(item_body(Some(&delivery_link()), Some(&account_link())));
            expect_children();
        }
        Operation::ItemDeliveryAddress => {
            mock.expect_get(url("A_PurReqAddDelivery"))
                .with_filter(ITEM_FILTER)
                .return_body(delivery_body());
        }
        Operation::ItemAccount => {
            mock.expect_get(url("A_PurReqnAcctAssgmt"))
                .with_filter(ITEM_FILTER)
                .return_body(account_body());
        }
        Operation::PurchasingDocument => {
            mock.expect_get(url("A_PurchaseRequisitionItem"))
                .with_filter("PurchasingDocument eq '4500000001' and PurchasingDocumentItem eq '10'")
                .return_body(EMPTY);
        }
    }
}

#[tokio::test]
async fn test_every_subset_runs_exactly_its_operations() {
    for mask in 0u32..32 {
        let subset: Vec<Operation> = Operation::ALL
            .into_iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, op)| op)
            .collect();

        let mock = MockRequestClient::new();
        for op in &subset {
            expect_operation(&mock, *op);
        }
        let logger = Arc::new(MemoryLogger::new());
        let names: Vec<&str> = subset.iter().map(|op| op.name()).collect();

        caller(&mock, &logger).run(&ids(), &names).await;

        let has = |op: Operation| usize::from(subset.contains(&op));
        let (header, item, delivery, account, document) = (
            has(Operation::Header),
            has(Operation::Item),
            has(Operation::ItemDeliveryAddress),
            has(Operation::ItemAccount),
            has(Operation::PurchasingDocument),
        );
        let count = |set: &str| {
            logger
                .entries()
                .iter()
                .filter(|e| e.entity_set == set)
                .count()
        };

        assert_eq!(count("A_PurchaseRequisitionHeader"), header, "{names:?}");
        assert_eq!(count("A_PurchaseRequisitionItem"), header + item + document, "{names:?}");
        assert_eq!(count("A_PurReqAddDelivery"), header + item + delivery, "{names:?}");
        assert_eq!(count("A_PurReqnAcctAssgmt"), header + item + account, "{names:?}");
        assert!(logger.failures().is_empty(), "{names:?}");
        mock.verify();
    }
}

// --- Panics ---

/// Delegates to a mock, but panics on any request whose URL contains `fragment`.
struct PanickingClient {
    fragment: &'static str,
    inner: MockRequestClient,
}

#[async_trait]
impl RequestClient for PanickingClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        if request.url.contains(self.fragment) {
            panic!("client blew up on {}", request.url);
        }
        self.inner.request(request).await
    }
}

#[tokio::test]
async fn test_panicking_operation_does_not_stop_siblings() {
    let mock = MockRequestClient::new();
    mock.expect_get(url("A_PurReqnAcctAssgmt"))
        .with_filter(ITEM_FILTER)
        .return_body(account_body());
    let client = PanickingClient {
        fragment: "A_PurchaseRequisitionHeader",
        inner: mock.clone(),
    };
    let logger = Arc::new(MemoryLogger::new());
    let caller =
        PurchaseRequisitionCaller::new(BASE_URL, Arc::new(client), logger.clone()).unwrap();

    tokio::time::timeout(
        Duration::from_secs(5),
        caller.run(&ids(), &["Header", "ItemAccount"]),
    )
    .await
    .expect("run did not return after a branch panicked");

    assert_eq!(logger.len(), 1);
    assert_eq!(fetched(&logger, "A_PurReqnAcctAssgmt"), vec![1]);
    mock.verify();
}
