use bundlehunt_cloud::{BundleFilter, BundleProvider, CloudError, PurchaseOrder, PurchaseOutcome};
use bundlehunt_cloud_tencent::{Credentials, LighthouseProvider, TencentConfig};
use httpmock::prelude::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn provider(server: &MockServer) -> LighthouseProvider {
    LighthouseProvider::new(TencentConfig {
        credentials: Credentials {
            secret_id: "AKIDEXAMPLE".into(),
            secret_key: "secret".into(),
        },
        region: "ap-hongkong".into(),
        endpoint: Some(server.base_url()),
        bundle_type: "RAZOR_SPEED_BUNDLE".into(),
    })
    .unwrap()
}

fn order() -> PurchaseOrder {
    PurchaseOrder {
        blueprint_id: "lhbp-abc".into(),
        instance_name_prefix: "auto-ruichi".into(),
        instance_count: 1,
        period_months: 1,
        renew_flag: "NOTIFY_AND_MANUAL_RENEW".into(),
    }
}

fn bundle(id: &str, state: &str) -> serde_json::Value {
    json!({
        "BundleId": id,
        "CPU": 2,
        "Memory": 4,
        "BundleSalesState": state,
        "InternetMaxBandwidthOut": 200,
        "BundleType": "RAZOR_SPEED_BUNDLE"
    })
}

fn listing(bundles: Vec<serde_json::Value>) -> serde_json::Value {
    let total = bundles.len();
    json!({
        "Response": {
            "BundleSet": bundles,
            "TotalCount": total,
            "RequestId": "req-list"
        }
    })
}

async fn mock_listing(server: &MockServer, bundles: Vec<serde_json::Value>) {
    let body = listing(bundles);
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("x-tc-action", "DescribeBundles")
                .body_contains("RAZOR_SPEED_BUNDLE");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        })
        .await;
}

// ---------------------------------------------------------------------------
// Listing and availability
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_requests_are_signed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header_exists("authorization")
                .header("x-tc-version", "2020-03-24")
                .header("x-tc-region", "ap-hongkong")
                .header("content-type", "application/json; charset=utf-8");
            then.status(200).json_body(listing(vec![]));
        })
        .await;

    provider(&server).validate_credentials().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_bundles_by_type() {
    let server = MockServer::start_async().await;
    mock_listing(
        &server,
        vec![
            bundle("bundle_a", "SOLD_OUT"),
            bundle("bundle_b", "AVAILABLE"),
        ],
    )
    .await;

    let bundles = provider(&server)
        .list_bundles(&BundleFilter::bundle_type("RAZOR_SPEED_BUNDLE"))
        .await
        .unwrap();

    assert_eq!(bundles.len(), 2);
    assert_eq!(bundles[0].id, "bundle_a");
    assert!(bundles[1].is_available());
}

#[tokio::test]
async fn test_list_bundles_follows_pages() {
    let server = MockServer::start_async().await;
    let first_page: Vec<_> = (0..100)
        .map(|i| bundle(&format!("bundle_{i:03}"), "SOLD_OUT"))
        .collect();

    let first = server
        .mock_async(|when, then| {
            when.method(POST).path("/").body_contains("\"Offset\":0");
            then.status(200).json_body(json!({
                "Response": { "BundleSet": first_page, "TotalCount": 101, "RequestId": "p1" }
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(POST).path("/").body_contains("\"Offset\":100");
            then.status(200).json_body(json!({
                "Response": {
                    "BundleSet": [bundle("bundle_last", "AVAILABLE")],
                    "TotalCount": 101,
                    "RequestId": "p2"
                }
            }));
        })
        .await;

    let p = provider(&server);
    let bundles = p
        .list_bundles(&p.category_filter())
        .await
        .unwrap();

    assert_eq!(bundles.len(), 101);
    assert_eq!(bundles[100].id, "bundle_last");
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_is_available_states() {
    let server = MockServer::start_async().await;
    mock_listing(
        &server,
        vec![
            bundle("bundle_sold", "SOLD_OUT"),
            bundle("bundle_open", "AVAILABLE"),
        ],
    )
    .await;
    let p = provider(&server);

    assert!(p.is_available("bundle_open").await.unwrap());
    assert!(!p.is_available("bundle_sold").await.unwrap());
    // Absent ids are "not available", not an error
    assert!(!p.is_available("bundle_missing").await.unwrap());
}

#[tokio::test]
async fn test_is_available_on_empty_category() {
    let server = MockServer::start_async().await;
    mock_listing(&server, vec![]).await;

    assert!(!provider(&server).is_available("bundle_any").await.unwrap());
}

#[tokio::test]
async fn test_is_available_propagates_api_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "Response": {
                    "Error": { "Code": "RequestLimitExceeded", "Message": "slow down" },
                    "RequestId": "req-limit"
                }
            }));
        })
        .await;

    let err = provider(&server).is_available("bundle_a").await.unwrap_err();
    match err {
        CloudError::ApiError { code, .. } => assert_eq!(code, "RequestLimitExceeded"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_validate_credentials_auth_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "Response": {
                    "Error": { "Code": "AuthFailure.SecretIdNotFound", "Message": "unknown key" },
                    "RequestId": "req-auth"
                }
            }));
        })
        .await;

    let err = provider(&server).validate_credentials().await.unwrap_err();
    assert!(err.is_auth_failure());
}

// ---------------------------------------------------------------------------
// Purchase
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_purchase_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("x-tc-action", "CreateInstances")
                .body_contains("\"BundleId\":\"bundle_open\"")
                .body_contains("\"BlueprintId\":\"lhbp-abc\"")
                .body_contains("\"ClientToken\"")
                .body_contains("\"InstanceName\":\"auto-ruichi-");
            then.status(200).json_body(json!({
                "Response": { "InstanceIdSet": ["lhins-1"], "RequestId": "req-buy" }
            }));
        })
        .await;

    let outcome = provider(&server).purchase("bundle_open", &order()).await;

    assert_eq!(outcome, PurchaseOutcome::created(vec!["lhins-1".into()]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_purchase_business_failure_is_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "Response": {
                    "Error": {
                        "Code": "ResourceInsufficient.SpecifiedInstanceType",
                        "Message": "sold out"
                    },
                    "RequestId": "req-sold"
                }
            }));
        })
        .await;

    match provider(&server).purchase("bundle_open", &order()).await {
        PurchaseOutcome::Failed { reason, code } => {
            assert!(reason.contains("sold out"));
            assert_eq!(
                code.as_deref(),
                Some("ResourceInsufficient.SpecifiedInstanceType")
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_purchase_transport_failure_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(502).body("Bad Gateway");
        })
        .await;

    match provider(&server).purchase("bundle_open", &order()).await {
        PurchaseOutcome::Failed { reason, code } => {
            assert!(reason.contains("502"));
            assert!(code.is_none());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_inspect_compares_query_paths() {
    let server = MockServer::start_async().await;
    mock_listing(&server, vec![bundle("bundle_a", "SOLD_OUT")]).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/").body_contains("bundle-id");
            then.status(200)
                .json_body(listing(vec![bundle("bundle_a", "AVAILABLE")]));
        })
        .await;

    let inspection = provider(&server).inspect("bundle_a").await.unwrap();
    assert_eq!(inspection.listed_ids, vec!["bundle_a".to_string()]);
    assert!(inspection.by_id.is_some());
    assert!(inspection.states_diverge());
}
